use unicode_normalization::UnicodeNormalization;

const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036f}';

pub fn slugify(name: &str) -> String {
    let stripped: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .filter(|c| {
            c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace() || *c == '-'
        })
        .collect();

    let mut slug = String::with_capacity(stripped.len());
    for c in stripped.chars() {
        let c = if c.is_whitespace() { '-' } else { c };
        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug.trim_matches('-').to_string()
}

/// 32-bit `h * 31 + unit` rolling hash over the UTF-16 units of the original
/// name, absolute value, base 36.
pub fn name_hash(name: &str) -> String {
    let hash = name.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(i32::from(unit))
    });
    to_base36(i64::from(hash).unsigned_abs())
}

pub fn encode(name: &str) -> String {
    format!("{}-{}", slugify(name), name_hash(name))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Resolved(String),
    /// No candidate matched. `lossy` is the slug with hyphens turned into
    /// spaces; accents, casing and punctuation are gone.
    Unresolved { lossy: String },
}

impl Decoded {
    pub fn resolved(&self) -> Option<&str> {
        match self {
            Decoded::Resolved(name) => Some(name.as_str()),
            Decoded::Unresolved { .. } => None,
        }
    }

    pub fn best_effort(&self) -> &str {
        match self {
            Decoded::Resolved(name) => name,
            Decoded::Unresolved { lossy } => lossy,
        }
    }
}

/// Splits on the last hyphen. An identifier without one is all hash.
pub fn split_route_id(route_id: &str) -> (&str, &str) {
    route_id.rsplit_once('-').unwrap_or(("", route_id))
}

pub fn find_original_name<'a, I, S>(slug: &str, hash: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    candidates
        .into_iter()
        .map(<S as AsRef<str>>::as_ref)
        .find(|candidate| name_hash(candidate) == hash && slugify(candidate) == slug)
}

pub fn decode<'a, I, S>(route_id: &str, candidates: I) -> Decoded
where
    I: IntoIterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    let (slug, hash) = split_route_id(route_id);
    match find_original_name(slug, hash, candidates) {
        Some(name) => Decoded::Resolved(name.to_string()),
        None => Decoded::Unresolved {
            lossy: slug.replace('-', " "),
        },
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}
