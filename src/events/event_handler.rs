/// Implemented by components that consume a channel's events through
/// `EventObserver::subscribe_component`.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
