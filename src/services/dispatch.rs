//! Dispatch - Running queries off the event loop
//!
//! Controllers never await. They hand a [`Query`] to a [`Dispatcher`] together
//! with a [`Ticket`]; the answer comes back later as [`AppEvent::Fetched`].

use crossbeam_channel::Sender;

use crate::error::Result;
use crate::eventing::{AppEvent, Ticket};
use crate::services::client::ApiClient;
use crate::services::query::{EvolutionBundle, HostBundle, Payload, Query};
use crate::services::runtime::spawn_named_in_tokio;

/// Runs queries on behalf of a chart controller
pub trait Dispatcher {
    /// Start `query`; the result must eventually be delivered for `ticket`
    fn dispatch(&self, ticket: Ticket, query: Query);
}

/// Execute a query against the backend. Bundles fan out concurrently and
/// fail as a whole if any required part fails.
pub async fn execute(client: &ApiClient, query: Query) -> Result<Payload> {
    match query {
        Query::Matrix(params) => client.sport_country_matrix(&params).await.map(Payload::Matrix),
        Query::Flow(params) => client.medal_flow(&params).await.map(Payload::Flow),
        Query::Evolution => {
            let (tally, countries, games) =
                futures::try_join!(client.medal_tally(), client.countries(), client.games())?;
            Ok(Payload::Evolution(EvolutionBundle {
                tally,
                countries,
                games,
            }))
        }
        Query::Host => {
            let required = async {
                futures::try_join!(client.host_performance(), client.countries(), client.games())
            };
            let (required, cities) = futures::join!(required, client.host_cities());
            let (hosts, countries, games) = required?;
            // City names only decorate the title
            let cities = cities.unwrap_or_else(|e| {
                tracing::warn!("Host cities unavailable, titles fall back to country: {}", e);
                Vec::new()
            });
            Ok(Payload::Host(HostBundle {
                hosts,
                countries,
                games,
                cities,
            }))
        }
        Query::Sports => client.sports().await.map(Payload::Sports),
        Query::SportMedals { sport } => client.sport_medals(&sport).await.map(Payload::SportMedals),
    }
}

/// Dispatcher that performs real HTTP requests on the tokio runtime
#[derive(Clone)]
pub struct HttpDispatcher {
    client: ApiClient,
    events: Sender<AppEvent>,
}

impl HttpDispatcher {
    pub fn new(client: ApiClient, events: Sender<AppEvent>) -> Self {
        Self { client, events }
    }
}

impl Dispatcher for HttpDispatcher {
    fn dispatch(&self, ticket: Ticket, query: Query) {
        let client = self.client.clone();
        let events = self.events.clone();
        let name = query.name();
        tracing::debug!("Dispatching {} for {} {}", name, ticket.chart, ticket.request);

        spawn_named_in_tokio(name, async move {
            let result = execute(&client, query).await;
            if events.send(AppEvent::Fetched { ticket, result }).is_err() {
                tracing::debug!("Event loop closed, dropping {} response", ticket.chart);
            }
        });
    }
}

#[cfg(test)]
pub use recording::RecordingDispatcher;
