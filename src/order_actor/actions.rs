use crate::model::DeliveryStatus;

#[derive(Debug, Clone, Copy)]
pub enum OrderAction {
    /// Moves the status forward; a regression is ignored.
    /// The result is the status after the action.
    AdvanceStatus(DeliveryStatus),
}
