//! Places page view-state machine.
//!
//! The page moves `Search -> Results -> Details` and back to `Search`.
//! Orthogonal to the view is a [`Phase`]: idle, loading, or failed with a
//! message. Failures never change the view, so the user keeps whatever was
//! on screen and sees the error beside it.

use placehub_types::{PlaceDetails, SearchCandidate};

use crate::api::ApiClient;
use crate::error::ClientError;

/// What the page shows.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    /// Only the search form.
    Search,
    /// Candidates of the last search, possibly none.
    Results {
        /// Query that produced the candidates.
        query: String,
        /// Matching places.
        candidates: Vec<SearchCandidate>,
    },
    /// A single place.
    Details(Box<PlaceDetails>),
}

/// Progress of the latest request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Nothing in flight.
    Idle,
    /// A search or detail request is in flight.
    Loading,
    /// The latest request failed.
    Failed(String),
}

impl Phase {
    /// A failure carrying `error`'s message, or `fallback` when it has none.
    pub(crate) fn failed(error: &ClientError, fallback: &str) -> Self {
        let message = error.to_string();
        Self::Failed(if message.is_empty() {
            fallback.to_owned()
        } else {
            message
        })
    }
}

/// State of the places page.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacesPage {
    view: View,
    phase: Phase,
}

impl Default for PlacesPage {
    fn default() -> Self {
        Self::new()
    }
}

impl PlacesPage {
    /// A fresh page showing the search form.
    pub const fn new() -> Self {
        Self {
            view: View::Search,
            phase: Phase::Idle,
        }
    }

    /// Current view.
    pub const fn view(&self) -> &View {
        &self.view
    }

    /// Current phase.
    pub const fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Whether a request is in flight.
    pub const fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading)
    }

    /// Message of the latest failure.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// The search form is hidden while a place is shown.
    pub const fn shows_search_form(&self) -> bool {
        !matches!(self.view, View::Details(_))
    }

    /// A finished search that matched nothing ("No places found").
    pub fn is_empty_result(&self) -> bool {
        matches!(&self.view, View::Results { candidates, .. } if candidates.is_empty())
            && !self.is_loading()
    }

    /// Mark a request as started, clearing any previous error.
    pub fn begin_request(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Apply the outcome of a search.
    pub fn finish_search(&mut self, query: &str, outcome: Result<Vec<SearchCandidate>, ClientError>) {
        match outcome {
            Ok(candidates) => {
                self.view = View::Results {
                    query: query.to_owned(),
                    candidates,
                };
                self.phase = Phase::Idle;
            }
            Err(e) => self.fail(&e, "Search failed"),
        }
    }

    /// Apply the outcome of selecting a place.
    pub fn finish_select(&mut self, outcome: Result<PlaceDetails, ClientError>) {
        match outcome {
            Ok(details) => {
                self.view = View::Details(Box::new(details));
                self.phase = Phase::Idle;
            }
            Err(e) => self.fail(&e, "Failed to load place details"),
        }
    }

    /// Leave the details view for the search form. No effect elsewhere.
    pub fn back(&mut self) {
        if matches!(self.view, View::Details(_)) {
            self.view = View::Search;
        }
    }

    /// Run a search through `api` and apply its outcome.
    pub async fn search(&mut self, api: &ApiClient, query: &str) {
        self.begin_request();
        let outcome = api.search_places(query).await;
        self.finish_search(query, outcome);
    }

    /// Load the details of `place_id` through `api` and apply the outcome.
    pub async fn select(&mut self, api: &ApiClient, place_id: &str) {
        self.begin_request();
        let outcome = api.place_details(place_id).await;
        self.finish_select(outcome);
    }

    fn fail(&mut self, error: &ClientError, fallback: &str) {
        self.phase = Phase::failed(error, fallback);
    }
}

#[cfg(test)]
mod tests {
    use placehub_types::PlaceId;

    use super::*;

    fn candidate(id: &str) -> SearchCandidate {
        SearchCandidate {
            place_id: PlaceId::new(id),
            name: format!("Place {id}"),
            formatted_address: String::from("Somewhere"),
            icon: String::new(),
            types: Vec::new(),
            image: String::new(),
        }
    }

    fn details(id: &str) -> PlaceDetails {
        PlaceDetails {
            id: PlaceId::new(id),
            name: format!("Place {id}"),
            address: String::from("Somewhere"),
            rating: None,
            phone: None,
            website: None,
            opening_hours: None,
            types: None,
            vicinity: None,
            photos: None,
            reviews: None,
        }
    }

    fn api_error(message: &str) -> ClientError {
        ClientError::Api {
            status: 400,
            message: message.to_owned(),
        }
    }

    #[test]
    fn search_success_shows_results() {
        let mut page = PlacesPage::new();
        page.begin_request();
        assert!(page.is_loading());

        page.finish_search("cafe", Ok(vec![candidate("a"), candidate("b")]));
        assert_eq!(*page.phase(), Phase::Idle);
        assert!(matches!(page.view(), View::Results { query, candidates }
            if query == "cafe" && candidates.len() == 2));
    }

    #[test]
    fn empty_search_is_still_results() {
        let mut page = PlacesPage::new();
        page.begin_request();
        page.finish_search("nothing", Ok(Vec::new()));
        assert!(page.is_empty_result());
        assert!(page.error().is_none());
    }

    #[test]
    fn failure_keeps_view_and_records_message() {
        let mut page = PlacesPage::new();
        page.finish_search("cafe", Ok(vec![candidate("a")]));

        page.begin_request();
        page.finish_select(Err(api_error("Place not found: NOT_FOUND")));
        assert!(matches!(page.view(), View::Results { .. }));
        assert_eq!(page.error(), Some("Place not found: NOT_FOUND"));

        // A new request clears the error.
        page.begin_request();
        assert!(page.error().is_none());
    }

    #[test]
    fn select_then_back_returns_to_search() {
        let mut page = PlacesPage::new();
        page.finish_search("cafe", Ok(vec![candidate("a")]));
        page.begin_request();
        page.finish_select(Ok(details("a")));
        assert!(!page.shows_search_form());

        page.back();
        assert_eq!(*page.view(), View::Search);
        assert!(page.shows_search_form());
    }

    #[test]
    fn back_outside_details_does_nothing() {
        let mut page = PlacesPage::new();
        page.finish_search("cafe", Ok(vec![candidate("a")]));
        page.back();
        assert!(matches!(page.view(), View::Results { .. }));
    }

    #[test]
    fn empty_error_message_uses_fallback() {
        let mut page = PlacesPage::new();
        page.finish_search("cafe", Err(ClientError::InvalidInput(String::new())));
        assert_eq!(page.error(), Some("Search failed"));
    }
}
