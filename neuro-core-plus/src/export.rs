//! CSV writers for traces, sweeps and F-I curves.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use neuro_core::Trace;

use crate::error::PlusResult;
use crate::sweep::{FiPoint, SweepFrame};

/// Header `t,<vars...>`, one row per sample.
pub fn write_trace_csv<W: Write>(trace: &Trace, writer: W) -> PlusResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let mut header = Vec::with_capacity(trace.dim() + 1);
    header.push("t");
    header.extend(trace.names.iter().copied());
    wtr.write_record(&header)?;

    let mut record = Vec::with_capacity(trace.dim() + 1);
    for i in 0..trace.len() {
        record.clear();
        record.push(trace.time[i].to_string());
        record.extend(trace.columns.iter().map(|col| col[i].to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Long form `current,t,<vars...>`, frames stacked in sweep order.
pub fn write_sweep_csv<W: Write>(frames: &[SweepFrame], writer: W) -> PlusResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    let Some(first) = frames.first() else {
        wtr.flush()?;
        return Ok(());
    };
    let mut header = vec!["current", "t"];
    header.extend(first.trace.names.iter().copied());
    wtr.write_record(&header)?;

    let mut record = Vec::with_capacity(header.len());
    for frame in frames {
        let current = frame.current.to_string();
        for i in 0..frame.trace.len() {
            record.clear();
            record.push(current.clone());
            record.push(frame.trace.time[i].to_string());
            record.extend(frame.trace.columns.iter().map(|col| col[i].to_string()));
            wtr.write_record(&record)?;
        }
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_fi_csv<W: Write>(points: &[FiPoint], writer: W) -> PlusResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for p in points {
        wtr.serialize(p)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_trace_file<P: AsRef<Path>>(trace: &Trace, path: P) -> PlusResult<()> {
    write_trace_csv(trace, File::create(&path)?)?;
    tracing::info!(path = %path.as_ref().display(), rows = trace.len(), "wrote trace");
    Ok(())
}

pub fn write_sweep_file<P: AsRef<Path>>(frames: &[SweepFrame], path: P) -> PlusResult<()> {
    write_sweep_csv(frames, File::create(&path)?)?;
    tracing::info!(path = %path.as_ref().display(), frames = frames.len(), "wrote sweep");
    Ok(())
}

pub fn write_fi_file<P: AsRef<Path>>(points: &[FiPoint], path: P) -> PlusResult<()> {
    write_fi_csv(points, File::create(&path)?)?;
    tracing::info!(path = %path.as_ref().display(), points = points.len(), "wrote F-I curve");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_trace() -> Trace {
        let mut tr = Trace::with_capacity(&["V", "W"], 2);
        tr.push(0.0, &[-1.5, 0.0]);
        tr.push(0.5, &[2.0, 0.25]);
        tr
    }

    #[test]
    fn trace_layout() {
        let mut buf = Vec::new();
        write_trace_csv(&small_trace(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "t,V,W\n0,-1.5,0\n0.5,2,0.25\n");
    }

    #[test]
    fn sweep_layout() {
        let frames = vec![
            SweepFrame { current: 1.0, trace: small_trace() },
            SweepFrame { current: 2.5, trace: small_trace() },
        ];
        let mut buf = Vec::new();
        write_sweep_csv(&frames, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "current,t,V,W");
        assert_eq!(lines[3], "2.5,0,-1.5,0");
    }

    #[test]
    fn empty_sweep_writes_nothing() {
        let mut buf = Vec::new();
        write_sweep_csv(&[], &mut buf).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn fi_header_from_field_names() {
        let mut buf = Vec::new();
        write_fi_csv(&[FiPoint { current: 1.0, spikes: 3, rate_hz: 50.0 }], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "current,spikes,rate_hz\n1.0,3,50.0\n");
    }
}
