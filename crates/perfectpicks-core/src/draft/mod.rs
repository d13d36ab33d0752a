// Draft bookkeeping: snake pick order, the append-only pick log, and the
// per-team roster board.

pub mod order;
pub mod pick;
pub mod roster;
pub mod state;
