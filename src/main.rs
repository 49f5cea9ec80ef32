//! Binary entry point for the `lzjwm` command-line tool.
//!
//! Validates `-c`/`-d`, reads every input, routes through YAML / line /
//! default framing, optionally dedups, compresses or decompresses, and
//! renders the selected output form.

use anyhow::{Context, Result};
use clap::Parser;

use lzjwm::cli::args::{Args, OutputForm};
use lzjwm::cli::constants::set_display_level;
use lzjwm::config::{ByteSet, Config};
use lzjwm::decompress::decompress;
use lzjwm::displaylevel;
use lzjwm::header;
use lzjwm::io::{read_inputs, splitlines, write_output, InputFile};
use lzjwm::record::{frame_and_compress, InputRecord};
use lzjwm::yaml;

fn main() {
    let args = Args::parse();
    if let Err(e) = args.validate() {
        eprintln!("lzjwm: {e}");
        std::process::exit(1);
    }
    set_display_level(1 + args.verbose as u32);

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("lzjwm: {e:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(args: &Args) -> Result<()> {
    let inputs = read_inputs(&args.files)?;
    displaylevel!(2, "read {} input stream(s)\n", inputs.len());

    let mut config = Config::default_config();
    if args.no_compress_nul {
        let mut no_compress = ByteSet::new();
        no_compress.insert(0);
        config.set_no_compress(no_compress);
    }
    if args.terminate {
        config.set_terminator(vec![0]);
    }

    if args.decompress {
        run_decompress(args, &inputs, &config)
    } else {
        run_compress(args, &inputs, &config)
    }
}

/// `-d`: the compressed bitstream is simply the concatenation of every input
/// (with an optional NUL separator mirroring the `-0` terminator used at
/// compression time); decode it in full and write the original bytes out.
fn run_decompress(args: &Args, inputs: &[InputFile], config: &Config) -> Result<()> {
    let mut buf = Vec::new();
    for input in inputs {
        buf.extend_from_slice(&input.bytes);
        if args.terminate {
            buf.push(0);
        }
    }
    let mut sink = Vec::new();
    decompress(&buf, 0, usize::MAX, config, &mut sink).context("decoding bitstream")?;
    write_output(args.output.as_deref(), &sink)
}

fn run_compress(args: &Args, inputs: &[InputFile], config: &Config) -> Result<()> {
    let records = build_records(args, inputs)?;
    displaylevel!(2, "framing {} record(s)\n", records.len());

    let (bytes, manifest) =
        frame_and_compress(&records, config, args.dedup).context("compressing")?;
    displaylevel!(3, "compressed to {} tokens\n", bytes.len());

    let rendered: Vec<u8> = match args.format {
        OutputForm::Raw => bytes,
        OutputForm::Yaml => yaml::render_output(&bytes, &manifest)?.into_bytes(),
        OutputForm::C => header::emit_header(&bytes, &manifest, false).into_bytes(),
        OutputForm::CAvr => header::emit_header(&bytes, &manifest, true).into_bytes(),
    };
    write_output(args.output.as_deref(), &rendered)
}

fn build_records(args: &Args, inputs: &[InputFile]) -> Result<Vec<InputRecord>> {
    if args.yaml {
        let mut records = Vec::new();
        for input in inputs {
            records.extend(yaml::parse_input_records(&input.bytes)?);
        }
        Ok(records)
    } else if args.lines {
        let mut joined = Vec::new();
        for input in inputs {
            joined.extend_from_slice(&input.bytes);
        }
        Ok(splitlines(&joined)
            .into_iter()
            .enumerate()
            .map(|(i, line)| InputRecord::new(i.to_string(), line))
            .collect())
    } else {
        Ok(inputs
            .iter()
            .map(|input| InputRecord::new(input.name.clone(), input.bytes.clone()))
            .collect())
    }
}
