pub mod cancel_hold_cmd;
pub mod place_hold_cmd;
pub mod queue_position_cmd;
