use tracing::trace;

use super::trie::SyllableTable;
use super::NASAL;
use crate::buffer::{OutputSequence, StagingBuffer};
use crate::kana::OutputUnit;
use crate::settings::Rules;

/// Units produced by one reduction run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Reduction {
    /// Units appended to the output sequence.
    pub emitted: usize,
    /// Units lost because the output sequence was full.
    pub dropped: usize,
}

impl Reduction {
    fn record(&mut self, appended: bool) {
        if appended {
            self.emitted += 1;
        } else {
            self.dropped += 1;
        }
    }

    pub fn merge(&mut self, other: Reduction) {
        self.emitted += other.emitted;
        self.dropped += other.dropped;
    }

    pub fn is_empty(&self) -> bool {
        self.emitted == 0 && self.dropped == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Gemination,
    Syllable,
    PassThrough,
}

struct Step {
    rule: Rule,
    unit: OutputUnit,
    consumed: usize,
}

/// Reduces staged romaji against a syllable table under a rule set.
pub struct Transliterator<'a> {
    table: &'a SyllableTable,
    rules: &'a Rules,
}

impl<'a> Transliterator<'a> {
    pub fn new(table: &'a SyllableTable, rules: &'a Rules) -> Self {
        Self { table, rules }
    }

    /// Run the reduction loop until no rule fires.
    ///
    /// Staged input is consumed even when the output is full; the unit is
    /// then counted as dropped.
    pub fn reduce(&self, staging: &mut StagingBuffer, output: &mut OutputSequence) -> Reduction {
        let mut reduction = Reduction::default();
        while let Some(step) = self.next_step(staging) {
            trace!(
                rule = ?step.rule,
                staged = staging.as_str(),
                consumed = step.consumed,
                unit = %step.unit,
                "reduce"
            );
            reduction.record(output.append(step.unit));
            staging.consume_prefix(step.consumed);
        }
        reduction
    }

    /// Resolve a lone held-over "n" to ん. Anything else is left alone.
    pub fn resolve_trailing_nasal(
        &self,
        staging: &mut StagingBuffer,
        output: &mut OutputSequence,
    ) -> Reduction {
        let mut reduction = Reduction::default();
        if staging.len() == 1 && staging.first_char() == Some(NASAL) {
            reduction.record(output.append(OutputUnit::HATSUON));
            staging.clear();
        }
        reduction
    }

    /// Drain the staging buffer completely.
    ///
    /// A head that is a complete spelling (only a deferred "n" can be) is
    /// resolved; any other head goes out as a literal, and the remainder is
    /// reduced again so later syllables still convert.
    pub fn flush(&self, staging: &mut StagingBuffer, output: &mut OutputSequence) -> Reduction {
        let mut reduction = self.reduce(staging, output);
        while let Some(head) = staging.first_char() {
            let (unit, consumed) = match self.table.lookup_longest_match(staging.as_str()) {
                Some(m) => (m.unit, m.len),
                None => (OutputUnit::Literal(head), 1),
            };
            trace!(staged = staging.as_str(), unit = %unit, "flush");
            reduction.record(output.append(unit));
            staging.consume_prefix(consumed);
            reduction.merge(self.reduce(staging, output));
        }
        reduction
    }

    fn next_step(&self, staging: &StagingBuffer) -> Option<Step> {
        let head = staging.first_char()?;
        let next = staging.second_char();

        if next == Some(head) && self.rules.geminates(head) {
            return Some(Step {
                rule: Rule::Gemination,
                unit: OutputUnit::SOKUON,
                consumed: 1,
            });
        }

        if let Some(m) = self
            .table
            .matches(staging.as_str())
            .find(|m| !self.defers_nasal(m.spelling, next))
        {
            return Some(Step {
                rule: Rule::Syllable,
                unit: m.unit,
                consumed: m.len,
            });
        }

        if self.rules.pass_through_unmatched && !self.table.can_start(head) {
            return Some(Step {
                rule: Rule::PassThrough,
                unit: OutputUnit::Literal(head),
                consumed: 1,
            });
        }

        None
    }

    /// The single-letter nasal waits while it may still head a longer
    /// syllable: nothing follows yet, or the follower is a continuation.
    fn defers_nasal(&self, spelling: &str, next: Option<char>) -> bool {
        let mut chars = spelling.chars();
        if chars.next() != Some(NASAL) || chars.next().is_some() {
            return false;
        }
        next.map_or(true, |c| self.rules.continues_nasal(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::CommitPolicy;

    struct Fixture {
        rules: Rules,
        staging: StagingBuffer,
        output: OutputSequence,
    }

    impl Fixture {
        fn new() -> Self {
            Self::with_rules(Rules::default())
        }

        fn with_rules(rules: Rules) -> Self {
            Self {
                rules,
                staging: StagingBuffer::default(),
                output: OutputSequence::default(),
            }
        }

        /// Push each char and reduce after every one, like a keystroke stream.
        fn type_str(&mut self, s: &str) -> Reduction {
            let mut total = Reduction::default();
            for c in s.chars() {
                self.staging.push(c);
                let t = Transliterator::new(SyllableTable::global(), &self.rules);
                total.merge(t.reduce(&mut self.staging, &mut self.output));
            }
            total
        }

        fn flush(&mut self) -> Reduction {
            let t = Transliterator::new(SyllableTable::global(), &self.rules);
            t.flush(&mut self.staging, &mut self.output)
        }

        fn text(&self) -> String {
            self.output.to_text()
        }

        fn pending(&self) -> &str {
            self.staging.as_str()
        }
    }

    #[test]
    fn test_basic_ka() {
        let mut f = Fixture::new();
        f.type_str("ka");
        assert_eq!(f.text(), "か");
        assert_eq!(f.pending(), "");
    }

    #[test]
    fn test_kya_single_unit() {
        let mut f = Fixture::new();
        let r = f.type_str("kya");
        assert_eq!(r.emitted, 1);
        assert_eq!(f.output.as_slice(), &[OutputUnit::Converted("きゃ")]);
        assert_eq!(f.pending(), "");
    }

    #[test]
    fn test_sokuon_kk_keeps_second() {
        let mut f = Fixture::new();
        f.type_str("kk");
        assert_eq!(f.text(), "っ");
        assert_eq!(f.pending(), "k");
    }

    #[test]
    fn test_sokuon_kka() {
        let mut f = Fixture::new();
        f.type_str("kka");
        assert_eq!(
            f.output.as_slice(),
            &[OutputUnit::SOKUON, OutputUnit::Converted("か")]
        );
        assert_eq!(f.pending(), "");
    }

    #[test]
    fn test_sokuon_tto() {
        let mut f = Fixture::new();
        f.type_str("tto");
        assert_eq!(f.text(), "っと");
        assert_eq!(f.output.len(), 2);
    }

    #[test]
    fn test_sokuon_before_digraph() {
        let mut f = Fixture::new();
        f.type_str("matcha");
        assert_eq!(f.pending(), "tcha");
        let mut f = Fixture::new();
        f.type_str("macchi");
        assert_eq!(f.text(), "まっち");
    }

    #[test]
    fn test_triple_consonant_geminates_twice() {
        let mut f = Fixture::new();
        f.type_str("kkka");
        assert_eq!(f.text(), "っっか");
    }

    #[test]
    fn test_nn_is_not_gemination() {
        let mut f = Fixture::new();
        f.type_str("nn");
        assert_eq!(f.text(), "ん");
        assert_eq!(f.pending(), "n");
    }

    #[test]
    fn test_n_waits_alone() {
        let mut f = Fixture::new();
        let r = f.type_str("n");
        assert!(r.is_empty());
        assert_eq!(f.pending(), "n");
    }

    #[test]
    fn test_na_not_pre_resolved() {
        let mut f = Fixture::new();
        f.type_str("na");
        assert_eq!(f.output.as_slice(), &[OutputUnit::Converted("な")]);
    }

    #[test]
    fn test_nk_resolves_nasal_first() {
        let mut f = Fixture::new();
        f.type_str("nk");
        assert_eq!(f.text(), "ん");
        assert_eq!(f.pending(), "k");
    }

    #[test]
    fn test_nya_and_apostrophe() {
        let mut f = Fixture::new();
        f.type_str("nya");
        assert_eq!(f.text(), "にゃ");

        let mut f = Fixture::new();
        f.type_str("n'a");
        assert_eq!(f.text(), "んあ");
    }

    #[test]
    fn test_konnichiha() {
        let mut f = Fixture::new();
        f.type_str("konnichiha");
        assert_eq!(f.text(), "こんにちは");
        assert_eq!(f.pending(), "");
    }

    #[test]
    fn test_kyouha() {
        let mut f = Fixture::new();
        f.type_str("kyouha");
        assert_eq!(f.text(), "きょうは");
    }

    #[test]
    fn test_dead_combination_stays_staged() {
        let mut f = Fixture::new();
        f.type_str("kx");
        assert_eq!(f.text(), "");
        assert_eq!(f.pending(), "kx");
    }

    #[test]
    fn test_unstartable_head_passes_through() {
        let mut f = Fixture::new();
        f.type_str("1ka");
        assert_eq!(
            f.output.as_slice(),
            &[OutputUnit::Literal('1'), OutputUnit::Converted("か")]
        );
    }

    #[test]
    fn test_unstartable_head_stays_when_disabled() {
        let mut f = Fixture::with_rules(Rules {
            pass_through_unmatched: false,
            ..Rules::default()
        });
        f.type_str("1ka");
        assert_eq!(f.text(), "");
        assert_eq!(f.pending(), "1ka");
    }

    #[test]
    fn test_narrow_gemination_set() {
        let mut f = Fixture::with_rules(Rules {
            gemination: "k".to_string(),
            commit: CommitPolicy::Retain,
            ..Rules::default()
        });
        f.type_str("tto");
        assert_eq!(f.text(), "");
        assert_eq!(f.pending(), "tto");
        f.staging.clear();
        f.type_str("kko");
        assert_eq!(f.text(), "っこ");
    }

    #[test]
    fn test_narrow_continuation_set() {
        let mut f = Fixture::with_rules(Rules {
            nasal_continuations: "aiueo".to_string(),
            ..Rules::default()
        });
        f.type_str("nya");
        assert_eq!(f.text(), "んや");
    }

    #[test]
    fn test_resolve_trailing_nasal() {
        let mut f = Fixture::new();
        f.type_str("kan");
        let t = Transliterator::new(SyllableTable::global(), &f.rules);
        let r = t.resolve_trailing_nasal(&mut f.staging, &mut f.output);
        assert_eq!(r.emitted, 1);
        assert_eq!(f.text(), "かん");
        assert!(f.staging.is_empty());
    }

    #[test]
    fn test_resolve_trailing_nasal_ignores_other_text() {
        let mut f = Fixture::new();
        f.type_str("ky");
        let t = Transliterator::new(SyllableTable::global(), &f.rules);
        let r = t.resolve_trailing_nasal(&mut f.staging, &mut f.output);
        assert!(r.is_empty());
        assert_eq!(f.pending(), "ky");
    }

    #[test]
    fn test_flush_literals_then_nasal() {
        let mut f = Fixture::new();
        f.type_str("kn");
        assert_eq!(f.pending(), "kn");
        let r = f.flush();
        assert_eq!(r.emitted, 2);
        assert_eq!(
            f.output.as_slice(),
            &[OutputUnit::Literal('k'), OutputUnit::HATSUON]
        );
        assert!(f.staging.is_empty());
    }

    #[test]
    fn test_flush_nasal_before_semivowel() {
        let mut f = Fixture::new();
        f.type_str("ny");
        f.flush();
        assert_eq!(
            f.output.as_slice(),
            &[OutputUnit::HATSUON, OutputUnit::Literal('y')]
        );
    }

    #[test]
    fn test_flush_reconverts_tail() {
        let mut f = Fixture::new();
        f.type_str("kxka");
        assert_eq!(f.pending(), "kxka");
        f.flush();
        assert_eq!(f.text(), "kxか");
    }

    #[test]
    fn test_output_overflow_still_consumes() {
        let mut f = Fixture::new();
        f.output = OutputSequence::new(1);
        let r = f.type_str("kaki");
        assert_eq!(r, Reduction { emitted: 1, dropped: 1 });
        assert_eq!(f.text(), "か");
        assert!(f.staging.is_empty());
    }
}
