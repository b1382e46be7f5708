//! Millisecond packing for SRT timestamps.
//!
//! `HH:MM:SS,mmm` packs to `((hr*60+min)*60+sec)*1000+msec` and formats
//! back by repeated division, so the two directions are exact inverses for
//! every in-range value.

/// Packs timestamp components into milliseconds.
pub fn pack(hr: u64, min: u64, sec: u64, msec: u64) -> u64 {
    ((hr * 60 + min) * 60 + sec) * 1000 + msec
}

/// Formats milliseconds as a fixed-width `HH:MM:SS,mmm` timestamp.
pub fn format(ms: u64) -> String {
    let mut rest = ms;
    let msec = rest % 1000;
    rest /= 1000;
    let sec = rest % 60;
    rest /= 60;
    let min = rest % 60;
    rest /= 60;
    let hr = rest;
    format!("{hr:02}:{min:02}:{sec:02},{msec:03}")
}
