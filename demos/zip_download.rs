use s_zip::StreamingZipWriter;
use std::io::{self, Write};
use tracing::{info, instrument};
use zip_responder::{
    responder::{ResponderCfg, ZipResponder},
    stream::{CallbackStream, OffsetSink},
    writer::ResponseWriter,
    Disposition, Response,
};

#[instrument(skip(sink), err)]
fn generate(sink: &mut dyn Write, files: usize) -> io::Result<()> {
    let mut zip = StreamingZipWriter::from_writer(OffsetSink::new(sink))
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    for i in 0..files {
        zip.start_entry(&format!("report-{}.csv", i))
            .and_then(|_| zip.write_data(format!("id,value\n{},{}\n", i, i * i).as_bytes()))
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    }
    let sink = zip
        .finish()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
    info!(len = sink.offset(), "archive generated");
    Ok(())
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = ResponderCfg::builder().chunk_size(4096).build();
    let responder = ZipResponder::with_cfg(cfg.clone());

    let stream = CallbackStream::new(|sink: &mut dyn Write| generate(sink, 3));
    let res = responder.with_zip_stream(
        &Response::new(),
        stream,
        "reports.zip",
        Disposition::Attachment,
    );
    info!(size = ?res.body_size(), "response prepared, nothing generated yet");

    let mut w = ResponseWriter::from_cfg(Vec::new(), &cfg);
    w.send(&res)?;
    let wire = w.into_inner();
    info!(len = wire.len(), "response flushed");

    Ok(())
}
