//! Orders sub-client — place and list.

use crate::client::TickerboardClient;
use crate::domain::order::wire::{NewOrder, Order};
use crate::error::SdkError;

pub struct Orders<'a> {
    pub(crate) client: &'a TickerboardClient,
}

impl<'a> Orders<'a> {
    /// All orders recorded this session (`GET /api/orders`).
    pub async fn list(&self) -> Result<Vec<Order>, SdkError> {
        Ok(self.client.http.get_orders().await?)
    }

    /// Place an order (`POST /api/orders`).
    ///
    /// The response carries the server-assigned id and timestamp. A failed
    /// placement surfaces as an error to the caller; it never touches feed
    /// state.
    pub async fn place(&self, order: &NewOrder) -> Result<Order, SdkError> {
        Ok(self.client.http.create_order(order).await?)
    }
}
