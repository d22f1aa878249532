// ShakeUp - Sensor Subscription
//
// The screen session never touches the IMU directly. It asks a hub to start
// or stop delivering accelerometer samples; on the device the hub is a gate
// shared with the sensor task, in the host replay it only records state.

pub trait SensorHub {
    /// Whether the device has an accelerometer at all.
    fn is_available(&self) -> bool;

    /// Start delivering samples. Registering twice is harmless.
    fn register(&mut self);

    /// Stop delivering samples. Unregistering twice is harmless.
    fn unregister(&mut self);
}
