//! Portfolio projects shown by the showcase.

/// One portfolio card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub summary: &'static str,
}

const PORTFOLIO: [Project; 8] = [
    Project {
        title: "Lexer",
        summary: "Incremental tokenizer for an editor plugin",
    },
    Project {
        title: "Cache",
        summary: "Sharded LRU with TTL eviction",
    },
    Project {
        title: "Codec",
        summary: "Streaming varint framing",
    },
    Project {
        title: "Shell",
        summary: "Job-control shell with pipelines",
    },
    Project {
        title: "Crawler",
        summary: "Polite async site crawler",
    },
    Project {
        title: "Ledger",
        summary: "Double-entry bookkeeping CLI",
    },
    Project {
        title: "Tiles",
        summary: "Vector tile server",
    },
    Project {
        title: "Queue",
        summary: "Persistent work queue over SQLite",
    },
];

/// The first `count` projects of the portfolio, starting over when more are
/// requested than exist.
pub fn portfolio(count: usize) -> Vec<Project> {
    (0..count)
        .map(|i| PORTFOLIO[i % PORTFOLIO.len()].clone())
        .collect()
}
