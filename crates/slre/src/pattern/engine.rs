// Core matching engine: direct interpretation of the pattern text
//
// - MatchInfo (analyzer.rs) holds the group and branch tables, read-only here
// - MatchState holds the subject and the capture slots of the current attempt
// - match_group tries the alternatives of one group
// - match_slice walks one alternative left to right, backtracking over
//   quantified atoms and recursing into nested groups
//
// Subject positions are absolute offsets into the subject buffer; every
// slice of the subject handed around is a suffix starting at such an offset.

use std::ops::Range;

use log::trace;

use super::analyzer::{MatchInfo, Span};
use super::class::{is_quantifier, match_escape};
use crate::error::{Error, Result};
use crate::limits::Limits;

/// Turns the soft `NoMatch` failure into "consumed nothing", keeping every
/// other error.
trait Backtrack {
    fn or_zero(self) -> Result<usize>;
}

impl Backtrack for Result<usize> {
    #[inline(always)]
    fn or_zero(self) -> Result<usize> {
        match self {
            Err(Error::NoMatch) => Ok(0),
            other => other,
        }
    }
}

/// Match state for one call: tables, subject and capture scratch slots
pub struct MatchState<'a> {
    info: &'a MatchInfo<'a>,
    subject: &'a [u8],
    captures: Vec<Option<Capture>>, // slot i belongs to group i + 1
}

impl<'a> MatchState<'a> {
    pub fn new(info: &'a MatchInfo<'a>, subject: &'a [u8]) -> Self {
        Self {
            info,
            subject,
            captures: vec![None; info.capture_count()],
        }
    }

    /// Forget captures of a previous start offset
    #[inline]
    pub fn reset(&mut self) {
        self.captures.fill(None);
    }

    /// Copy the slots recorded by the accepted attempt; the rest of `out` is
    /// left as the caller passed it.
    fn commit(&self, out: &mut [Capture]) {
        for (slot, cap) in out.iter_mut().zip(&self.captures) {
            if let Some(cap) = cap {
                *slot = *cap;
            }
        }
    }
}

/// Try the alternatives of group `gi` against the subject suffix at `si`.
///
/// Every alternative is evaluated, in source order, and the outcome of the
/// last one is returned: an earlier alternative that matched is overridden by
/// a later one that did not.
fn match_group(ms: &mut MatchState, gi: usize, si: usize) -> Result<usize> {
    let info = ms.info;
    let mut outcome = Err(Error::NoMatch);
    for alt in info.alternatives(gi)? {
        outcome = match match_slice(ms, alt, si) {
            Err(err) if err != Error::NoMatch => return Err(err),
            other => other,
        };
        trace!(
            "group {gi} alternative [{}] at {si} -> {outcome:?}",
            info.text(alt).escape_ascii()
        );
    }
    outcome
}

/// Match the pattern slice `pat` against the subject suffix at `s0`.
/// Returns the number of subject bytes consumed.
///
/// Scanning stops when either the slice or the subject runs out. Leftover
/// pattern is a failure unless it is exactly a trailing `$`, which is how
/// the end-of-subject anchor is matched.
fn match_slice(ms: &mut MatchState, pat: Span, s0: usize) -> Result<usize> {
    let info = ms.info;
    let re = info.text(pat);
    let s_len = ms.subject.len().saturating_sub(s0);
    let mut i = 0; // offset in re
    let mut j = 0; // offset in subject suffix

    while i < re.len() && j < s_len {
        let c = re[i];
        if is_quantifier(c) {
            return Err(Error::UnexpectedQuantifier);
        }
        let step = info.op_len(pat.start + i)?;

        // Look ahead for a quantifier on this atom
        if let Some(&q) = re.get(i + step)
            && is_quantifier(q)
        {
            if q == b'?' {
                let atom = info.slice(pat.start + i, step)?;
                j += match_slice(ms, atom, s0 + j).or_zero()?;
                i += step + 1;
                continue;
            }
            return match_repeat(ms, pat, i, step, s0, j);
        }

        match c {
            b'\\' => {
                let esc = re.get(i + 1).copied().ok_or(Error::InvalidMetacharacter)?;
                if !match_escape(esc, ms.subject[s0 + j])? {
                    return Err(Error::NoMatch);
                }
                j += 1;
            }
            b'(' => {
                let gi = info.group_at(pat.start + i)?;
                // The group may consume any amount of the remaining subject
                let n = match_group(ms, gi, s0 + j)?;
                if n == 0 {
                    return Err(Error::NoMatch);
                }
                trace!("captured group {gi} at {}+{n}", s0 + j);
                let slot = ms.captures.get_mut(gi - 1).ok_or(Error::Internal)?;
                *slot = Some(Capture::new(s0 + j, n));
                j += n;
            }
            b'^' => {
                if j != 0 {
                    return Err(Error::NoMatch);
                }
            }
            b'|' => return Err(Error::Internal),
            // Only valid as the last byte, checked after the loop
            b'$' => return Err(Error::NoMatch),
            b'.' => j += 1,
            _ => {
                if c != ms.subject[s0 + j] {
                    return Err(Error::NoMatch);
                }
                j += 1;
            }
        }
        i += step;
    }

    if i < re.len() && !(re[i] == b'$' && i + 1 == re.len()) {
        return Err(Error::NoMatch);
    }
    Ok(j)
}

/// `+` or `*` on the atom `re[i..i + step]`, greedy unless followed by `?`.
///
/// After every successful repetition the rest of the slice is matched
/// against what follows; the most recent total that worked is returned for
/// the whole slice. Non-greedy stops at the first total that works. The loop
/// only runs while the atom itself consumes input, so zero repetitions are
/// never tried on their own.
fn match_repeat(
    ms: &mut MatchState,
    pat: Span,
    i: usize, // atom offset in pat
    step: usize,
    s0: usize,
    j: usize, // subject consumed before the atom
) -> Result<usize> {
    let info = ms.info;
    let re = info.text(pat);
    let q = re[i + step];
    let non_greedy = re.get(i + step + 1) == Some(&b'?');
    let ni = i + step + 1 + usize::from(non_greedy); // pattern after the quantifier

    let atom = info.slice(pat.start + i, step)?;
    let rest = if ni < re.len() {
        Some(info.slice(pat.start + ni, re.len() - ni)?)
    } else {
        None
    };

    let mut j2 = j;
    let mut nj = 0;
    loop {
        let n1 = match_slice(ms, atom, s0 + j2).or_zero()?;
        if n1 == 0 {
            break;
        }
        match rest {
            None => nj = j2 + n1,
            Some(rest) => {
                let n2 = match_slice(ms, rest, s0 + j2 + n1).or_zero()?;
                if n2 > 0 {
                    nj = j2 + n1 + n2;
                }
            }
        }
        if nj > 0 && non_greedy {
            break;
        }
        j2 += n1;
    }

    if q == b'+' && nj == 0 {
        return Err(Error::NoMatch);
    }
    Ok(nj)
}

// ======================== Public API ========================

/// Subject span bound to one capturing group. Offsets are absolute within
/// the subject passed to the call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Capture {
    pub start: usize,
    pub len: usize,
}

impl Capture {
    #[inline(always)]
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline(always)]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// The captured bytes, or an empty slice if the span lies outside
    /// `subject`.
    pub fn as_bytes<'s>(&self, subject: &'s [u8]) -> &'s [u8] {
        subject.get(self.range()).unwrap_or_default()
    }
}

/// Construction-time matcher configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    pub(crate) limits: Limits,
    pub(crate) ignore_case: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Capacities of the group and branch tables.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Reserved. The flag is recorded with the pattern tables but the
    /// matcher always compares bytes exactly.
    pub fn ignore_case(mut self, yes: bool) -> Self {
        self.ignore_case = yes;
        self
    }
}

/// Match `pattern` against `subject` with default options.
///
/// Returns the end offset of the leftmost match, measured from the start of
/// `subject`; the start of the match is not reported, use a capture group or
/// anchor the pattern when it is needed. Captured spans are written into
/// `captures[i]` for group `i + 1`; slots of groups that did not take part in
/// the match are left untouched, and nothing is written when the call fails.
///
/// A zero end offset is only returned for a `^`-anchored pattern that matched
/// without consuming input.
pub fn matches(pattern: &str, subject: &[u8], captures: Option<&mut [Capture]>) -> Result<usize> {
    matches_with(pattern, subject, captures, &Options::default())
}

/// [`matches`] with explicit options.
pub fn matches_with(
    pattern: &str,
    subject: &[u8],
    captures: Option<&mut [Capture]>,
    options: &Options,
) -> Result<usize> {
    let info = MatchInfo::analyze(pattern.as_bytes(), options)?;
    if let Some(out) = captures.as_deref()
        && out.len() < info.capture_count()
    {
        return Err(Error::Internal);
    }

    // An anchored pattern is tried at offset 0 only, whatever the outcome
    let anchored = pattern.starts_with('^');
    let mut ms = MatchState::new(&info, subject);
    for si in 0..subject.len() {
        ms.reset();
        let outcome = match_group(&mut ms, 0, si);
        trace!("start offset {si} -> {outcome:?}");
        match outcome {
            Ok(n) if n > 0 || anchored => {
                if let Some(out) = captures {
                    ms.commit(out);
                }
                return Ok(si + n);
            }
            Ok(_) | Err(Error::NoMatch) if !anchored => {}
            Ok(_) | Err(Error::NoMatch) => break,
            Err(err) => return Err(err),
        }
    }
    Err(Error::NoMatch)
}

/// Number of capturing groups in `pattern`, i.e. how many capture slots a
/// call to [`matches`] may write.
pub fn capture_count(pattern: &str) -> Result<usize> {
    MatchInfo::analyze(pattern.as_bytes(), &Options::default()).map(|info| info.capture_count())
}
