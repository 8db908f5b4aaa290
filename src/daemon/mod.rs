pub mod control;
pub mod detach;
pub mod dispatch;
pub mod lock;
pub mod start;
