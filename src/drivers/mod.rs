//! Input and output drivers, and the encoder interrupt setup.

pub mod button;
pub mod buzzer;
pub mod encoder;
pub mod hw_init;
pub mod seven_segment;
pub mod tm1637;
pub mod uv_source;
