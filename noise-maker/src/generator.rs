use chrono::NaiveDateTime;
use rand::{Rng, seq::IndexedRandom};

const METHODS: [(&str, u8); 2] = [("GET", 9), ("HEAD", 1)];
const PATHS: [(&str, u8); 8] = [
    ("/", 10),
    ("/index.html", 30),
    ("/posts/intro.html", 20),
    ("/posts/roadmap.html", 15),
    ("/about.html", 10),
    ("/styles.css", 20),
    ("/favicon.png", 15),
    ("/feed/atom.xml", 5),
];
const STATUS: [(u16, u8); 4] = [(200, 60), (304, 20), (404, 10), (403, 2)];

// I2P destination hashes are base32, no padding.
const ROUTER_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz234567";
const ROUTER_HASH_LEN: usize = 52;

pub fn random_router_hash<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..ROUTER_HASH_LEN)
        .map(|_| *ROUTER_ALPHABET.choose(rng).unwrap() as char)
        .collect()
}

/// One access-log line in the eepsite format the analyzer expects:
/// `<router> -  -  [<stamp> +0000] "<method> <path>" <status> - "-" "-"`.
/// Requests carry no protocol token, matching what the eepsite's server
/// writes.
pub fn generate_access_line<R: Rng + ?Sized>(
    rng: &mut R,
    router: &str,
    timestamp: NaiveDateTime,
) -> String {
    let stamp = timestamp.format("%d/%b/%Y:%H:%M:%S");
    let method = METHODS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let path = PATHS.choose_weighted(rng, |(_, w)| *w).unwrap().0;
    let status = STATUS.choose_weighted(rng, |(_, w)| *w).unwrap().0;

    format!("{router} -  -  [{stamp} +0000] \"{method} {path}\" {status} - \"-\" \"-\"")
}
