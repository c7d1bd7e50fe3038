use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

/// A reactive value that can be watched for changes.
///
/// Controls publish their rendered content through it and the simulation
/// host publishes player state through it. Each watcher gets the current
/// value immediately when subscribing.
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self { tx, rx }
    }

    /// Set a new value and notify all watchers.
    ///
    /// Watchers are only woken when the value actually differs.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        });
    }

    /// Apply an in-place edit and notify watchers if anything changed.
    pub(crate) fn update<F>(&self, edit: F)
    where
        T: PartialEq,
        F: FnOnce(&mut T),
    {
        self.tx.send_if_modified(|current| {
            let before = current.clone();
            edit(current);
            *current != before
        });
    }

    /// Get the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes.
    pub fn watch(&self) -> impl Stream<Item = T> + Send {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use futures::StreamExt;

    use super::*;

    #[tokio::test]
    async fn watch_yields_current_then_changes() {
        let property = Property::new(1);
        let mut stream = Box::pin(property.watch());

        assert_eq!(stream.next().await, Some(1));
        property.set(2);
        assert_eq!(stream.next().await, Some(2));
    }

    #[test]
    fn update_edits_in_place() {
        let property = Property::new(vec![1]);
        property.update(|values| values.push(2));
        assert_eq!(property.get(), vec![1, 2]);
    }
}
