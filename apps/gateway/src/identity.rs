//! Client identity resolution from proxy headers.

use axum::http::HeaderMap;
use compact_str::CompactString;

/// Identity used when no forwarding header names the caller.
///
/// All unidentified clients share one bucket; a coarse but intentional
/// fallback.
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// Derive the rate-limit identity for a request: the first entry of
/// `x-forwarded-for`, else `x-real-ip`, else the shared sentinel.
pub fn client_identity(headers: &HeaderMap) -> CompactString {
    if let Some(forwarded) = header_str(headers, "x-forwarded-for")
        && let Some(first) = forwarded.split(',').next()
        && !first.trim().is_empty()
    {
        return first.trim().into();
    }
    if let Some(real_ip) = header_str(headers, "x-real-ip")
        && !real_ip.trim().is_empty()
    {
        return real_ip.trim().into();
    }
    UNKNOWN_IDENTITY.into()
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name)?.to_str().ok()
}
