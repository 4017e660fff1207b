use std::sync::Arc;

use log::{debug, info};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::app::state::{RequestState, RequestToken, REQUEST_ERROR_MESSAGE};
use crate::config::AppConfig;
use crate::fetch::{FetchError, FetchResult, QueryParams, QuoteSeries, QuoteTransport};
use crate::utils::normalize_symbol;

/// Outcome of one spawned request, tagged with the token it was issued under.
#[derive(Debug)]
pub struct Completion {
    token: RequestToken,
    outcome: FetchResult<QuoteSeries>,
}

struct InFlight {
    token: RequestToken,
    params: QueryParams,
    handle: JoinHandle<()>,
}

/// Keeps at most one relevant request outstanding for the current symbol and lookback window.
///
/// Parameter setters only record input and funnel into a single evaluation step, which is the one
/// place requests get cancelled and issued. Request tasks report back over a channel; a completion
/// is applied only while its token is still the in-flight one, so a superseded request can never
/// overwrite newer state no matter when it finishes.
///
/// Issuing a request spawns a Tokio task, so the mutating methods must run inside a runtime.
pub struct QuoteFetchController {
    transport: Arc<dyn QuoteTransport>,
    symbol: String,
    lookback_days: u32,
    issued: Option<QueryParams>,
    in_flight: Option<InFlight>,
    next_token: u64,
    state: RequestState,
    state_tx: watch::Sender<RequestState>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl QuoteFetchController {
    /// Build an idle controller. Nothing is requested until [`start`](Self::start) or a setter runs.
    pub fn new(transport: Arc<dyn QuoteTransport>, symbol: &str, lookback_days: u32) -> Self {
        let (state_tx, _) = watch::channel(RequestState::Idle);
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            transport,
            symbol: normalize_symbol(symbol),
            lookback_days,
            issued: None,
            in_flight: None,
            next_token: 0,
            state: RequestState::Idle,
            state_tx,
            completions_tx,
            completions_rx,
        }
    }

    pub fn from_config(transport: Arc<dyn QuoteTransport>, config: &AppConfig) -> Self {
        Self::new(transport, &config.default_symbol, config.default_days)
    }

    /// Issue the first request for the initial parameters.
    pub fn start(&mut self) -> Option<RequestToken> {
        self.evaluate(false)
    }

    pub fn set_symbol(&mut self, value: &str) -> Option<RequestToken> {
        self.symbol = normalize_symbol(value);
        self.evaluate(false)
    }

    pub fn set_lookback_days(&mut self, value: u32) -> Option<RequestToken> {
        self.lookback_days = value;
        self.evaluate(false)
    }

    /// Re-issue the current parameters even if they have not changed.
    pub fn refresh(&mut self) -> Option<RequestToken> {
        self.evaluate(true)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Parameters of the most recently issued request.
    pub fn issued_params(&self) -> Option<&QueryParams> {
        self.issued.as_ref()
    }

    pub fn in_flight_token(&self) -> Option<RequestToken> {
        self.in_flight.as_ref().map(|req| req.token)
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    /// Observe every state transition. The receiver starts at the current state.
    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state_tx.subscribe()
    }

    fn evaluate(&mut self, force: bool) -> Option<RequestToken> {
        let Some(params) = QueryParams::new(&self.symbol, self.lookback_days) else {
            // No effective params: nothing issued may still land.
            debug!("blank symbol; dropping current request");
            self.cancel_in_flight();
            self.issued = None;
            if self.state != RequestState::Idle {
                self.transition(RequestState::Idle);
            }
            return None;
        };

        if !force && self.issued.as_ref() == Some(&params) {
            return None;
        }

        Some(self.issue(params))
    }

    fn issue(&mut self, params: QueryParams) -> RequestToken {
        self.cancel_in_flight();

        self.next_token += 1;
        let token = RequestToken::from_raw(self.next_token);
        debug!("issuing request {token} for {params}");

        let request = self.transport.fetch_quote(params.clone());
        let completions = self.completions_tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = request.await;
            // The controller may already be gone.
            let _ = completions.send(Completion { token, outcome });
        });

        self.issued = Some(params.clone());
        self.in_flight = Some(InFlight {
            token,
            params,
            handle,
        });
        self.transition(RequestState::Loading);
        token
    }

    fn cancel_in_flight(&mut self) {
        if let Some(previous) = self.in_flight.take() {
            debug!(
                "cancelling request {} for {}",
                previous.token, previous.params
            );
            previous.handle.abort();
        }
    }

    /// Apply one completion. Returns the token when it settled the in-flight request.
    pub fn apply(&mut self, completion: Completion) -> Option<RequestToken> {
        let Completion { token, outcome } = completion;

        match &self.in_flight {
            Some(req) if req.token == token => {}
            _ => {
                debug!("discarding stale completion of request {token}");
                return None;
            }
        }
        let settled = self.in_flight.take()?;

        match outcome {
            Ok(series) => {
                debug!(
                    "request {token} for {} loaded {} points",
                    settled.params,
                    series.len()
                );
                self.transition(RequestState::Loaded(series));
            }
            Err(FetchError::Cancelled) => {
                debug!("request {token} for {} was cancelled", settled.params);
            }
            Err(err) => {
                info!("request {token} for {} failed: {err}", settled.params);
                self.transition(RequestState::Failed(REQUEST_ERROR_MESSAGE.to_string()));
            }
        }

        Some(token)
    }

    /// Drain every completion that is ready without waiting. Returns how many settled the in-flight request.
    pub fn pump(&mut self) -> usize {
        let mut settled = 0;
        while let Ok(completion) = self.completions_rx.try_recv() {
            if self.apply(completion).is_some() {
                settled += 1;
            }
        }
        settled
    }

    /// Wait until the in-flight request settles, skipping stale completions on the way.
    ///
    /// Returns `None` straight away when nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<RequestToken> {
        while self.in_flight.is_some() {
            let completion = self.completions_rx.recv().await?;
            if let Some(token) = self.apply(completion) {
                return Some(token);
            }
        }
        None
    }

    fn transition(&mut self, next: RequestState) {
        self.state = next.clone();
        self.state_tx.send_replace(next);
    }
}

impl Drop for QuoteFetchController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}
