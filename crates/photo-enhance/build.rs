use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const LUT_SIZE: usize = 4096;

/// IEC 61966-2-1: sRGB to linear
fn decode(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1: linear to sRGB
fn encode(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(out: &mut impl Write, name: &str, doc: &str, f: fn(f64) -> f64) -> io::Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "/// Index: input * {}.0", LUT_SIZE - 1)?;
    writeln!(out, "pub(crate) static {name}: [f32; {LUT_SIZE}] = [")?;
    for i in 0..LUT_SIZE {
        let value = f(i as f64 / (LUT_SIZE - 1) as f64);
        if i % 8 == 0 {
            write!(out, "\n   ")?;
        }
        write!(out, " {:.9},", value as f32)?;
    }
    writeln!(out, "\n];\n")
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let dest = Path::new(&out_dir).join("gamma_lut.rs");
    let mut out = BufWriter::new(File::create(dest)?);

    write_table(&mut out, "SRGB_TO_LINEAR", "sRGB decode table", decode)?;
    write_table(&mut out, "LINEAR_TO_SRGB", "sRGB encode table", encode)?;
    out.flush()?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
