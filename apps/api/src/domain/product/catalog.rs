//! Immutable lookup tables shared by every analysis run.

use reqwest::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Brand {
    /// Canonical spelling used as the query prefix.
    pub name: &'static str,
    /// Alternate spellings seen on packaging, e.g. Hangul transliterations.
    pub aliases: &'static [&'static str],
}

const fn brand(name: &'static str, aliases: &'static [&'static str]) -> Brand {
    Brand { name, aliases }
}

// Multi-word names come before any name they contain.
pub const BRANDS: &[Brand] = &[
    brand("LANEIGE", &["라네즈"]),
    brand("COSRX", &["코스알엑스"]),
    brand("Innisfree", &["이니스프리"]),
    brand("Sulwhasoo", &["설화수"]),
    brand("Etude House", &["에뛰드하우스", "에뛰드"]),
    brand("The Face Shop", &["더페이스샵"]),
    brand("Missha", &["미샤"]),
    brand("Dr. Jart+", &["Dr Jart", "닥터자르트"]),
    brand("Klairs", &["클레어스"]),
    brand("Beauty of Joseon", &["조선미녀"]),
    brand("Anua", &["아누아"]),
    brand("Round Lab", &["라운드랩"]),
    brand("Torriden", &["토리든"]),
    brand("SKIN1004", &["스킨1004"]),
    brand("Some By Mi", &["썸바이미"]),
    brand("Banila Co", &["바닐라코"]),
    brand("Mediheal", &["메디힐"]),
    brand("Isntree", &["이즈앤트리"]),
    brand("Purito", &["퓨리토"]),
    brand("Shiseido", &["資生堂", "资生堂"]),
    brand("Hada Labo", &["肌研"]),
    brand("Rare Beauty", &[]),
    brand("Fenty", &[]),
    brand("Charlotte Tilbury", &[]),
    brand("Urban Decay", &[]),
    brand("Too Faced", &[]),
    brand("Tatcha", &[]),
    brand("Drunk Elephant", &[]),
    brand("Glossier", &[]),
    brand("Sol de Janeiro", &[]),
    brand("The Ordinary", &[]),
    brand("CeraVe", &[]),
    brand("La Roche-Posay", &[]),
    brand("Clinique", &[]),
    brand("NARS", &[]),
    brand("Benefit", &[]),
    brand("MAC", &[]),
];

/// Hosts excluded from product candidates: social networks, Q&A and wiki sites.
const BLOCKED_HOSTS: &[&str] = &[
    "instagram.com",
    "tiktok.com",
    "facebook.com",
    "twitter.com",
    "x.com",
    "pinterest.com",
    "youtube.com",
    "youtu.be",
    "linkedin.com",
    "tumblr.com",
    "snapchat.com",
    "reddit.com",
    "quora.com",
    "wikipedia.org",
    "wikihow.com",
    "google.com",
];

/// Subdomain labels that mark forums, communities and review boards on any site.
const BLOCKED_SUBDOMAINS: &[&str] = &["forum", "forums", "community", "reviews"];

/// Retailers and brand stores known to carry reliable product pages.
const TRUSTED_HOSTS: &[&str] = &[
    "amazon.com",
    "sephora.com",
    "ulta.com",
    "target.com",
    "walmart.com",
    "dermstore.com",
    "skinstore.com",
    "cultbeauty.com",
    "lookfantastic.com",
    "yesstyle.com",
    "sokoglam.com",
    "beautylish.com",
    "nordstrom.com",
    "macys.com",
    "stylevana.com",
    "oliveyoung.com",
    "thefaceshop.com",
    "innisfree.com",
    "etudehouse.com",
    "laneige.com",
    "cosrx.com",
    "paulaschoice.com",
];

fn host_matches(host: &str, domain: &str) -> bool {
    host == domain || host.ends_with(&format!(".{}", domain))
}

fn host_of(url: &str) -> Option<String> {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()))
}

/// True for social, forum, community and wiki URLs. Unparseable URLs fall
/// back to substring matching so malformed entries are still screened.
pub fn is_blocked_url(url: &str) -> bool {
    match host_of(url) {
        Some(host) => {
            BLOCKED_HOSTS.iter().any(|d| host_matches(&host, d))
                || host
                    .split('.')
                    .any(|label| BLOCKED_SUBDOMAINS.contains(&label))
        }
        None => {
            let lower = url.to_ascii_lowercase();
            BLOCKED_HOSTS.iter().any(|d| lower.contains(d))
                || BLOCKED_SUBDOMAINS
                    .iter()
                    .any(|label| lower.contains(&format!("{}.", label)))
        }
    }
}

pub fn is_trusted_retailer(url: &str) -> bool {
    host_of(url).is_some_and(|host| TRUSTED_HOSTS.iter().any(|d| host_matches(&host, d)))
}
