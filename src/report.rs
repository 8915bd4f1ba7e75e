use std::fmt;

use mmu::Access;

use crate::simulation::{Step, Summary};

fn banner(access: Access) -> &'static str {
    match access {
        Access::TlbHit => "-------TLB HIT-----------",
        Access::TableHit => "-------TABLE HIT-----------",
        Access::PageFault => "-------PAGE FAULT-----------",
    }
}

fn passed_or_failed(passed: bool) -> &'static str {
    if passed {
        " + "
    } else {
        "fail"
    }
}

/// Human-readable trace of one step: a classification banner, the
/// translation, and the pass/fail marker. Every fifth step ends with a spacer.
pub struct TraceLine<'a>(pub &'a Step);

impl fmt::Display for TraceLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = self.0;
        let t = &step.translation;
        writeln!(f, "{}", banner(t.access))?;
        write!(
            f,
            "log: {:5} 0x{:04x} (pg:{:3}, off:{:3})-->phy: {:5} (frm: {:3})--> val: {:4} == value: {:4} -- {}",
            t.address,
            t.address,
            t.page,
            t.offset,
            t.physical_address,
            t.frame,
            step.value,
            step.expected.value,
            passed_or_failed(step.verdict.passed)
        )?;
        if !step.oracle_in_sync() {
            write!(f, " (oracle address {})", step.expected.virtual_address)?;
        }
        writeln!(f)?;
        if step.index % 5 == 4 {
            writeln!(f)?;
        }
        Ok(())
    }
}

pub struct SummaryReport<'a>(pub &'a Summary);

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.0;
        writeln!(f)?;
        writeln!(f, "Page Fault Percentage: {:1.3}%", summary.page_fault_percentage())?;
        writeln!(f, "TLB Hit Percentage: {:1.3}%", summary.tlb_hit_percentage())?;
        writeln!(f)?;
        if summary.mismatches == 0 {
            writeln!(f, "ALL logical ---> physical assertions PASSED!")?;
        } else {
            writeln!(
                f,
                "{} of {} logical ---> physical assertions FAILED",
                summary.mismatches, summary.processed
            )?;
        }
        write!(f, "\n\t\t...done.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{oracle::OracleRecord, verify::Verdict};
    use mmu::{Stats, Translation};

    fn step(index: usize, access: Access, value: i8, expected: i8) -> Step {
        Step {
            index,
            translation: Translation {
                address: 16916,
                page: 66,
                offset: 20,
                frame: 0,
                physical_address: 20,
                access,
                eviction: None,
            },
            value,
            expected: OracleRecord {
                virtual_address: 16916,
                physical_address: 20,
                value: expected,
            },
            verdict: Verdict {
                passed: value == expected,
                fatal: false,
            },
        }
    }

    #[test]
    fn trace_line_layout() {
        let step = step(0, Access::PageFault, 0, 0);
        assert_eq!(
            TraceLine(&step).to_string(),
            "-------PAGE FAULT-----------\n\
             log: 16916 0x4214 (pg: 66, off: 20)-->phy:    20 (frm:   0)--> val:    0 == value:    0 --  + \n"
        );
    }

    #[test]
    fn trace_line_marks_failures_and_spacing() {
        let step = step(4, Access::TlbHit, 3, -3);
        let text = TraceLine(&step).to_string();
        assert!(text.starts_with("-------TLB HIT-----------\n"));
        assert!(text.contains("val:    3 == value:   -3 -- fail"));
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn trace_line_flags_oracle_desync() {
        let mut step = step(1, Access::TableHit, 0, 0);
        step.expected.virtual_address = 5;
        let text = TraceLine(&step).to_string();
        assert!(text.starts_with("-------TABLE HIT-----------\n"));
        assert!(text.contains("(oracle address 5)"));
    }

    #[test]
    fn summary_percentages() {
        let summary = Summary {
            processed: 1000,
            stats: Stats {
                tlb_hits: 55,
                table_hits: 701,
                page_faults: 244,
            },
            mismatches: 0,
        };
        let text = SummaryReport(&summary).to_string();
        assert!(text.contains("Page Fault Percentage: 24.400%"));
        assert!(text.contains("TLB Hit Percentage: 5.500%"));
        assert!(text.contains("ALL logical ---> physical assertions PASSED!"));
    }

    #[test]
    fn summary_reports_tolerated_failures() {
        let summary = Summary {
            processed: 10,
            stats: Stats::default(),
            mismatches: 2,
        };
        let text = SummaryReport(&summary).to_string();
        assert!(text.contains("2 of 10 logical ---> physical assertions FAILED"));
    }
}
