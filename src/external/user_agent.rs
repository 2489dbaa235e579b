//! Desktop browser User-Agent strings.
//!
//! The ticketing APIs serve their own web front ends and reject requests that
//! do not look like a browser, so every client picks one of these per process.

use rand::seq::IndexedRandom;

/// Browser families in the pool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Firefox,
    Chrome,
}

const FIREFOX_DESKTOP: &[&str] = &[
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0",
    "Mozilla/5.0 (X11; Linux x86_64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 14.7; rv:133.0) Gecko/20100101 Firefox/133.0",
];

const CHROME_DESKTOP: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
];

/// Random desktop User-Agent for the given browser family
pub fn user_agent_for(browser: Browser) -> &'static str {
    let pool = match browser {
        Browser::Firefox => FIREFOX_DESKTOP,
        Browser::Chrome => CHROME_DESKTOP,
    };
    pool.choose(&mut rand::rng()).copied().unwrap_or(pool[0])
}

/// Random desktop User-Agent from any family
pub fn random_user_agent() -> &'static str {
    let browser = [Browser::Firefox, Browser::Chrome]
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(Browser::Firefox);
    user_agent_for(browser)
}
