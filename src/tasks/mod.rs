pub mod power;
pub mod sensor;
pub mod ui;
