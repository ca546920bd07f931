//! Prices sub-client — the one-shot snapshot endpoint.

use crate::client::TickerboardClient;
use crate::domain::quote::wire::PriceMap;
use crate::error::SdkError;

pub struct Prices<'a> {
    pub(crate) client: &'a TickerboardClient,
}

impl<'a> Prices<'a> {
    /// Fetch the current price of every symbol (`GET /api/prices`).
    ///
    /// Used to seed the feed engine at startup; also callable directly.
    pub async fn snapshot(&self) -> Result<PriceMap, SdkError> {
        Ok(self.client.http.get_prices().await?)
    }
}
