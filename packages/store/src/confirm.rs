/// Pending target of a destructive action awaiting explicit confirmation.
///
/// The delete button only calls [`request`](Self::request); the remote delete
/// runs with whatever [`confirm`](Self::confirm) hands back. Cancelling leaves
/// nothing to act on.
#[derive(Clone, Debug, PartialEq)]
pub struct DeleteConfirmation<T> {
    pending: Option<T>,
}

impl<T> Default for DeleteConfirmation<T> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<T> DeleteConfirmation<T> {
    pub fn request(&mut self, target: T) {
        self.pending = Some(target);
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Take the target; the dialog closes either way.
    pub fn confirm(&mut self) -> Option<T> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;
    use crate::list::ElevatorList;
    use crate::memory::MemoryBackend;
    use crate::models::{Elevator, ElevatorStatus};
    use std::time::Duration;

    fn row(id: &str) -> Elevator {
        Elevator {
            id: id.into(),
            company_id: None,
            serial_number: format!("S-{id}"),
            model: "Gen2".into(),
            capacity: 400,
            status: ElevatorStatus::Operational,
            building_id: None,
            last_inspection: None,
            next_inspection: None,
        }
    }

    async fn run_dialog(
        list: &ElevatorList<MemoryBackend>,
        dialog: &mut DeleteConfirmation<String>,
        accept: bool,
    ) {
        if accept {
            if let Some(id) = dialog.confirm() {
                list.delete(&id).await.unwrap();
            }
        } else {
            dialog.cancel();
        }
    }

    #[tokio::test]
    async fn test_cancel_issues_no_delete() {
        let backend = MemoryBackend::with_elevators(vec![row("1"), row("2")]);
        let list = ElevatorList::new(backend.clone(), Duration::from_secs(120));
        list.load().await;

        let mut dialog = DeleteConfirmation::default();
        dialog.request("1".to_string());
        assert!(dialog.is_open());
        run_dialog(&list, &mut dialog, false).await;

        assert!(!dialog.is_open());
        assert_eq!(backend.calls("delete_elevator"), 0);
        assert_eq!(list.view().total, 2);
        assert_eq!(backend.get_elevators(None).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_confirm_deletes_exactly_the_requested_row() {
        let backend = MemoryBackend::with_elevators(vec![row("1"), row("2")]);
        let list = ElevatorList::new(backend.clone(), Duration::from_secs(120));
        list.load().await;

        let mut dialog = DeleteConfirmation::default();
        dialog.request("2".to_string());
        run_dialog(&list, &mut dialog, true).await;

        assert_eq!(backend.calls("delete_elevator"), 1);
        assert_eq!(list.view().rows.iter().map(|e| e.id.as_str()).collect::<Vec<_>>(), vec!["1"]);
        assert!(dialog.confirm().is_none());
    }
}
