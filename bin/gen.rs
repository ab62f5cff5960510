use bytes::BytesMut;
use clap::{Arg, Command};
use product_seed::{CopyTextEncoder, FakeProducts, RowSource};
use std::io::{self, Write};
use tokio_util::codec::Encoder;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("gen")
        .about("Write synthetic product rows to stdout in COPY text format")
        .arg(
            Arg::new("count")
                .long("count")
                .value_parser(clap::value_parser!(u64))
                .required(true),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .value_parser(clap::value_parser!(u64)),
        )
        .get_matches();

    let count = matches.get_one::<u64>("count").copied().unwrap_or_default();
    let mut source = FakeProducts::new(matches.get_one::<u64>("seed").copied());
    let mut encoder = CopyTextEncoder::new();

    let mut out = io::BufWriter::new(io::stdout().lock());
    let mut buf = BytesMut::with_capacity(1 << 16);

    for i in 0..count {
        encoder.encode(&source.next_row(), &mut buf)?;
        out.write_all(&buf)?;
        buf.clear();
        if i % 10_000 == 0 {
            out.flush()?;
        } // keep buffers moving on huge runs
    }

    out.flush()?;
    Ok(())
}
