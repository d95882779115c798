// Pattern analysis: group and branch tables
//
// One left-to-right pass records every `(...)` group and every `|` as offsets
// into the pattern text. Branches are then ordered by owning group so that
// each group owns one contiguous run of the branch table. The matcher only
// reads these tables; it never rescans the pattern for structure.

use log::debug;

use super::engine::Options;
use crate::error::{Error, Result};
use crate::limits::Limits;

/// A range of the pattern text, validated against the pattern length when
/// built through [`MatchInfo::slice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    #[inline(always)]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// One parenthesized group. Group 0 is implicit and spans the whole pattern.
#[derive(Debug, Clone, Copy)]
pub struct Group {
    pub start: usize,       // first byte after '('
    pub len: Option<usize>, // text between '(' and ')', unset until ')' is seen
    pub branches: usize,    // first owned entry in the branch table
    pub num_branches: usize,
}

impl Group {
    fn open(start: usize) -> Self {
        Self {
            start,
            len: None,
            branches: 0,
            num_branches: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> Result<usize> {
        self.len.ok_or(Error::Internal)
    }
}

/// One `|` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Branch {
    pub group: usize, // index of the owning group
    pub pos: usize,   // offset of the '|' in the pattern
}

/// Per-call pattern tables. Built once before matching and read-only after.
#[derive(Debug)]
pub struct MatchInfo<'p> {
    pattern: &'p [u8],
    groups: Vec<Group>,
    branches: Vec<Branch>,
    ignore_case: bool,
}

impl<'p> MatchInfo<'p> {
    /// Run the analyzer and the branch indexer over `pattern`.
    pub fn analyze(pattern: &'p [u8], options: &Options) -> Result<Self> {
        let mut info = Self {
            pattern,
            groups: Vec::new(),
            branches: Vec::new(),
            ignore_case: options.ignore_case,
        };
        info.scan(&options.limits)?;
        info.index_branches();
        debug!(
            "analyzed [{}]: {} groups, {} branches, ignore_case={}",
            pattern.escape_ascii(),
            info.groups.len(),
            info.branches.len(),
            info.ignore_case
        );
        Ok(info)
    }

    /// Single pass over the pattern: escapes are skipped as two-byte units,
    /// so `\(`, `\)` and `\|` never affect the structure.
    fn scan(&mut self, limits: &Limits) -> Result<()> {
        let re = self.pattern;
        self.groups.push(Group {
            len: Some(re.len()),
            ..Group::open(0)
        });

        // Groups still waiting for their ')'; its length is the nesting depth
        let mut open: Vec<usize> = Vec::new();
        let mut i = 0;
        while i < re.len() {
            let step = if re[i] == b'\\' { 2 } else { 1 };
            match re[i] {
                b'|' => {
                    if self.branches.len() >= limits.max_branches {
                        return Err(Error::TooManyBranches {
                            limit: limits.max_branches,
                        });
                    }
                    self.branches.push(Branch {
                        group: open.last().copied().unwrap_or(0),
                        pos: i,
                    });
                }
                b'(' => {
                    if self.groups.len() >= limits.max_groups {
                        return Err(Error::TooManyGroups {
                            limit: limits.max_groups,
                        });
                    }
                    open.push(self.groups.len());
                    self.groups.push(Group::open(i + 1));
                }
                b')' => {
                    let gi = open.pop().ok_or(Error::UnbalancedBrackets)?;
                    let group = &mut self.groups[gi];
                    group.len = Some(i - group.start);
                    // "()" can never capture anything
                    if i > 0 && re[i - 1] == b'(' {
                        return Err(Error::NoMatch);
                    }
                }
                _ => {}
            }
            i += step;
        }

        if !open.is_empty() {
            return Err(Error::UnbalancedBrackets);
        }
        Ok(())
    }

    /// Order branches by owning group and give every group its run.
    ///
    /// The sort must be stable: alternatives of one group are tried in
    /// source order.
    fn index_branches(&mut self) {
        self.branches.sort_by_key(|branch| branch.group);

        let mut cursor = 0;
        for (gi, group) in self.groups.iter_mut().enumerate() {
            group.branches = cursor;
            group.num_branches = 0;
            while cursor < self.branches.len() && self.branches[cursor].group == gi {
                group.num_branches += 1;
                cursor += 1;
            }
        }
    }

    #[inline]
    pub fn capture_count(&self) -> usize {
        self.groups.len().saturating_sub(1)
    }

    /// Pattern bytes covered by `span`.
    #[inline(always)]
    pub fn text(&self, span: Span) -> &'p [u8] {
        &self.pattern[span.start..span.end()]
    }

    /// Build a span, checking it lies inside the pattern.
    #[inline]
    pub fn slice(&self, start: usize, len: usize) -> Result<Span> {
        if start + len <= self.pattern.len() {
            Ok(Span { start, len })
        } else {
            Err(Error::Internal)
        }
    }

    /// Index of the group opened by the '(' at pattern offset `open`.
    pub fn group_at(&self, open: usize) -> Result<usize> {
        self.groups
            .get(1..)
            .ok_or(Error::Internal)?
            .binary_search_by_key(&(open + 1), |group| group.start)
            .map(|k| k + 1)
            .map_err(|_| Error::Internal)
    }

    /// Length of the atom starting at pattern offset `pos`: two bytes for an
    /// escape, the whole `(...)` for a group, one byte otherwise.
    pub fn op_len(&self, pos: usize) -> Result<usize> {
        match self.pattern.get(pos) {
            Some(b'\\') => Ok(2),
            Some(b'(') => {
                let gi = self.group_at(pos)?;
                Ok(self.groups[gi].len()? + 2)
            }
            Some(_) => Ok(1),
            None => Err(Error::Internal),
        }
    }

    /// The alternatives of group `gi` in source order. A group without `|`
    /// has a single alternative: its whole text.
    pub fn alternatives(&self, gi: usize) -> Result<impl Iterator<Item = Span> + '_> {
        let group = self.groups.get(gi).ok_or(Error::Internal)?;
        let end = group.start + group.len()?;
        let owned = self
            .branches
            .get(group.branches..group.branches + group.num_branches)
            .ok_or(Error::Internal)?;

        let mut from = group.start;
        Ok(owned
            .iter()
            .map(|branch| branch.pos)
            .chain(std::iter::once(end))
            .map(move |to| {
                let span = Span {
                    start: from,
                    len: to - from,
                };
                from = to + 1;
                span
            }))
    }
}
