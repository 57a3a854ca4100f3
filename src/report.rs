/*! Line-oriented text report

A report consists of a fixed header describing the schedulability
verdict, followed by one line per simulated tick:

```text
RM
SCHEDULABLE
U = 0.583
UB = 0.828
HYPERPERIOD = 12

0 T1
1 T2
...
```

An idle tick is written as the tick number followed by a single space.
A tick in which deadlines were missed names the running task (if any)
followed by one `DEADLINE_MISS(<name>)` marker per missed task, and is
the last line of the report.
*/

use std::io::{self, Write};

use auto_impl::auto_impl;
use itertools::Itertools;

use crate::analysis::{self, Algorithm, Analysis};
use crate::simulation::{Outcome, Simulator, Termination, Tick};
use crate::task::TaskSet;

/// An append-only destination for report lines.
#[auto_impl(&mut, Box)]
pub trait TraceSink {
    /// Append one line; `line` carries no line terminator.
    fn append_line(&mut self, line: &str) -> io::Result<()>;
}

impl TraceSink for Vec<String> {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        self.push(line.to_owned());
        Ok(())
    }
}

/// Writes each line, newline-terminated, to an [io::Write].
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        WriterSink { inner }
    }

    /// Flush and return the underlying writer.
    pub fn into_inner(mut self) -> io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> TraceSink for WriterSink<W> {
    fn append_line(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.inner, "{}", line)
    }
}

/// The header lines preceding the trace, including the trailing blank line.
pub fn header_lines(analysis: &Analysis) -> Vec<String> {
    let bound = match analysis.algorithm {
        Algorithm::RateMonotonic => format!("UB = {:.3}", analysis.bound),
        Algorithm::EarliestDeadlineFirst => format!("UB = {:.1}", analysis.bound),
    };
    vec![
        analysis.algorithm.to_string(),
        analysis.verdict.to_string(),
        format!("U = {:.3}", analysis.utilization),
        bound,
        format!("HYPERPERIOD = {}", analysis.hyperperiod),
        String::new(),
    ]
}

/// Format a single tick of the trace.
pub fn tick_line(tasks: &TaskSet, tick: &Tick) -> String {
    let running = tick.running.map_or("", |i| tasks[i].name.as_str());
    if tick.missed.is_empty() {
        format!("{} {}", tick.time, running)
    } else {
        let head = if running.is_empty() {
            format!("{} ", tick.time)
        } else {
            format!("{} {} ", tick.time, running)
        };
        let markers = tick
            .missed
            .iter()
            .format_with("", |&i, f| f(&format_args!(" DEADLINE_MISS({})", tasks[i].name)));
        format!("{}{}", head, markers)
    }
}

fn write_header<S: TraceSink + ?Sized>(analysis: &Analysis, sink: &mut S) -> io::Result<()> {
    for line in header_lines(analysis) {
        sink.append_line(&line)?;
    }
    Ok(())
}

/// Write the complete report for `analysis` and an already collected
/// `outcome` into `sink`.
pub fn render<S: TraceSink + ?Sized>(
    analysis: &Analysis,
    tasks: &TaskSet,
    outcome: &Outcome,
    sink: &mut S,
) -> io::Result<()> {
    write_header(analysis, sink)?;
    for tick in outcome.trace() {
        sink.append_line(&tick_line(tasks, tick))?;
    }
    if let Some(tick) = outcome.boundary() {
        sink.append_line(&tick_line(tasks, tick))?;
    }
    Ok(())
}

/// Analyse `tasks` under `algorithm`, simulate one hyperperiod with
/// fresh state, and write the report into `sink`.
///
/// Ticks are written as they are simulated, so memory use does not
/// depend on the length of the hyperperiod.
pub fn run<S: TraceSink + ?Sized>(
    tasks: &TaskSet,
    algorithm: Algorithm,
    sink: &mut S,
) -> io::Result<(Analysis, Termination)> {
    let analysis = analysis::analyze(tasks, algorithm);
    write_header(&analysis, sink)?;
    let simulator = Simulator::new(tasks, algorithm.policy(), analysis.hyperperiod);
    let termination = simulator.run_with(|tick| sink.append_line(&tick_line(tasks, &tick)))?;
    if let Termination::Completed { boundary: Some(tick) } = &termination {
        sink.append_line(&tick_line(tasks, tick))?;
    }
    Ok((analysis, termination))
}
