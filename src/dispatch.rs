use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Queue that marshals work back onto the UI thread.
///
/// Anything holding a [`DispatchHandle`] may post from any thread; the UI
/// thread drains the queue at the start of every frame.
pub struct Dispatcher<T> {
    sender: UnboundedSender<T>,
    receiver: UnboundedReceiver<T>,
    repaint: Option<egui::Context>,
}

impl<T> std::fmt::Debug for Dispatcher<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("repaint", &self.repaint.is_some())
            .finish()
    }
}

impl<T> Default for Dispatcher<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Dispatcher<T> {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded();
        Self {
            sender,
            receiver,
            repaint: None,
        }
    }

    /// Wake the UI whenever something is posted
    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.repaint = Some(ctx);
    }

    pub fn handle(&self) -> DispatchHandle<T> {
        DispatchHandle {
            sender: self.sender.clone(),
            repaint: self.repaint.clone(),
        }
    }

    pub fn post(&self, item: T) {
        self.handle().post(item);
    }

    /// Take everything queued so far, in posting order
    pub fn drain(&mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Ok(item) = self.receiver.try_recv() {
            items.push(item);
        }
        items
    }
}

/// Cloneable, `Send` posting end of a [`Dispatcher`]
pub struct DispatchHandle<T> {
    sender: UnboundedSender<T>,
    repaint: Option<egui::Context>,
}

impl<T> Clone for DispatchHandle<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            repaint: self.repaint.clone(),
        }
    }
}

impl<T> DispatchHandle<T> {
    pub fn post(&self, item: T) {
        if self.sender.unbounded_send(item).is_err() {
            log::warn!("Dispatcher closed; dropping posted item");
            return;
        }
        if let Some(ctx) = &self.repaint {
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_preserves_order() {
        let mut dispatcher = Dispatcher::new();
        dispatcher.post(1);
        dispatcher.post(2);
        dispatcher.post(3);
        assert_eq!(dispatcher.drain(), vec![1, 2, 3]);
        assert!(dispatcher.drain().is_empty());
    }

    #[test]
    fn test_post_from_worker_thread() {
        let mut dispatcher = Dispatcher::new();
        let handle = dispatcher.handle();

        std::thread::spawn(move || handle.post("done"))
            .join()
            .unwrap();

        assert_eq!(dispatcher.drain(), vec!["done"]);
    }
}
