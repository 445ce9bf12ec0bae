use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::model::{Price, PricePair};

static INTERN_EXTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        Intern\s*(?:CHF\s*)?(?P<intern>\d{1,4}[.,]\d{1,2})\s*/\s*Extern\s*(?:CHF\s*)?(?P<extern>\d{1,4}[.,]\d{1,2})
        |
        (?:CHF\s*)?(?P<intern_rev>\d{1,4}[.,]\d{1,2})\s*Intern\s*/\s*(?:CHF\s*)?(?P<extern_rev>\d{1,4}[.,]\d{1,2})\s*Extern
        ",
    )
    .expect("price marker regex is valid")
});

/// How a restaurant prints its staff/guest price pair. Each variant is a
/// separate splitter; shared code never branches on the restaurant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceMarker {
    /// `Intern 7.40 / Extern 12.40` or `7.40 Intern / 12.40 Extern`.
    InternExtern,
}

impl PriceMarker {
    fn regex(self) -> &'static Regex {
        match self {
            PriceMarker::InternExtern => &INTERN_EXTERN,
        }
    }

    fn price_pair(self, caps: &Captures<'_>) -> Option<PricePair> {
        match self {
            PriceMarker::InternExtern => {
                let intern = caps.name("intern").or_else(|| caps.name("intern_rev"))?;
                let external = caps.name("extern").or_else(|| caps.name("extern_rev"))?;
                Some(PricePair {
                    intern: Price::parse(intern.as_str())?,
                    external: Price::parse(external.as_str())?,
                })
            }
        }
    }
}

/// A day block cut at its price markers. `prices[k]` belongs to `slots[k]`,
/// the text printed before the `k`-th marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitBlock<'a> {
    pub slots: Vec<&'a str>,
    pub prices: Vec<PricePair>,
}

/// Cuts `text` at every recognized price marker. The leading segment is kept
/// even when empty so slots stay aligned with prices; a blank trailing
/// segment is dropped.
pub fn split_block(text: &str, marker: PriceMarker) -> SplitBlock<'_> {
    let mut slots = Vec::new();
    let mut prices = Vec::new();
    let mut last = 0;

    for caps in marker.regex().captures_iter(text) {
        let (Some(whole), Some(pair)) = (caps.get(0), marker.price_pair(&caps)) else {
            continue;
        };
        slots.push(&text[last..whole.start()]);
        prices.push(pair);
        last = whole.end();
    }

    let tail = &text[last..];
    if !tail.trim().is_empty() {
        slots.push(tail);
    }

    SplitBlock { slots, prices }
}
