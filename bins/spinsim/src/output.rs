use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

pub fn write_csv(path: &Path, header: [&str; 2], rows: &[(f64, f64)]) -> io::Result<()> {
    let mut f = File::create(path)?;
    writeln!(f, "{},{}", header[0], header[1])?;
    for (x, y) in rows {
        writeln!(f, "{},{}", x, y)?;
    }
    Ok(())
}
