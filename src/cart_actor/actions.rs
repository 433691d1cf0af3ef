use crate::model::{CartLine, MenuItem, MenuItemId};

/// Cart mutations. Every action answers with the resulting
/// [`CartSummary`](crate::model::CartSummary).
#[derive(Debug, Clone)]
pub enum CartAction {
    Add(MenuItem),
    SetQuantity { item_id: MenuItemId, delta: i32 },
    Remove(MenuItemId),
    Clear,
    /// Takes out the lines of a placed order; see [`Cart::remove_ordered`](crate::model::Cart::remove_ordered).
    RemoveOrdered(Vec<CartLine>),
}
