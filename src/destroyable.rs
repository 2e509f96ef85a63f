// implemented by anything holding channel subscriptions that must be released
// explicitly, since the Rc cycle through the listener keeps it alive otherwise
pub trait Destroyable {
    fn destroy(&mut self);
}
