pub mod cursor;
pub mod dialect;
pub mod diff;
pub mod direction;
pub mod edge;
pub mod error;
pub mod ids;
pub mod meta;
pub mod trigger;

pub use cursor::{FanOutCursor, IdPairCursor, TupleCursor};
pub use dialect::{Dialect, InsertShape, MembershipShape};
pub use diff::{TargetDiff, diff_targets};
pub use direction::{Direction, IdTypes, ResolvedJunction, resolve};
pub use edge::{Edge, EdgeSet};
pub use error::{JunctionError, JunctionResult};
pub use ids::{IdType, IdValue};
pub use meta::{AssociationProp, EntityType, JunctionTable, PropStorage};
pub use trigger::{BufferedTrigger, EdgeChangeKind, EdgeEvent, MutationTrigger};
