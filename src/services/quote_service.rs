use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

const QUOTE_URL: &str = "https://api.quotable.io/random?tags=motivational,success,technology";
const FETCH_TIMEOUT: Duration = Duration::from_secs(3);

const FALLBACK_QUOTES: [(&str, &str); 7] = [
    ("The secret of getting ahead is getting started.", "Mark Twain"),
    ("It always seems impossible until it's done.", "Nelson Mandela"),
    ("Don't watch the clock; do what it does — keep going.", "Sam Levenson"),
    (
        "Success is the sum of small efforts repeated day in and day out.",
        "Robert Collier",
    ),
    ("The future depends on what you do today.", "Mahatma Gandhi"),
    (
        "Discipline is choosing between what you want now and what you want most.",
        "Augusta F. Kantra",
    ),
    ("An investment in knowledge pays the best interest.", "Benjamin Franklin"),
];

#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Deserialize)]
struct QuoteApiResponse {
    content: String,
    author: String,
}

struct CachedQuote {
    date: NaiveDate,
    quote: Quote,
}

/// Best-effort daily quote with a one-calendar-day cache.
///
/// Remote failures of any kind fall back to a fixed local list indexed by
/// the day's ordinal, so the fallback is stable across reloads too.
#[derive(Clone)]
pub struct QuoteService {
    http: Option<reqwest::Client>,
    cache: Arc<Mutex<Option<CachedQuote>>>,
}

impl Default for QuoteService {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteService {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .ok();

        QuoteService {
            http,
            cache: Arc::new(Mutex::new(None)),
        }
    }

    pub async fn daily_quote(&self) -> Quote {
        let today = Local::now().date_naive();

        if let Ok(cache) = self.cache.lock() {
            if let Some(cached) = cache.as_ref() {
                if cached.date == today {
                    return cached.quote.clone();
                }
            }
        }

        let quote = match self.fetch_remote().await {
            Some(quote) => quote,
            None => Self::fallback_for(today),
        };

        if let Ok(mut cache) = self.cache.lock() {
            *cache = Some(CachedQuote {
                date: today,
                quote: quote.clone(),
            });
        }

        quote
    }

    /// Fixed local quote for the day, rotating through the list.
    pub fn fallback_for(date: NaiveDate) -> Quote {
        let index = date.num_days_from_ce() as usize % FALLBACK_QUOTES.len();
        let (quote, author) = FALLBACK_QUOTES[index];
        Quote {
            quote: quote.to_string(),
            author: author.to_string(),
        }
    }

    async fn fetch_remote(&self) -> Option<Quote> {
        let http = self.http.as_ref()?;

        let response = match http.get(QUOTE_URL).send().await {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                debug!(status = %response.status(), "quote service returned non-success");
                return None;
            }
            Err(e) => {
                debug!(error = %e, "quote fetch failed");
                return None;
            }
        };

        match response.json::<QuoteApiResponse>().await {
            Ok(body) => Some(Quote {
                quote: body.content,
                author: body.author,
            }),
            Err(e) => {
                debug!(error = %e, "quote response decode failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_stable_per_day_and_rotates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(
            QuoteService::fallback_for(date).quote,
            QuoteService::fallback_for(date).quote
        );

        let week_later = date + chrono::Duration::days(FALLBACK_QUOTES.len() as i64);
        assert_eq!(
            QuoteService::fallback_for(date).quote,
            QuoteService::fallback_for(week_later).quote
        );
        assert_ne!(
            QuoteService::fallback_for(date).quote,
            QuoteService::fallback_for(date.succ_opt().unwrap()).quote
        );
    }
}
