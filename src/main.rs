use std::io;

use image_fetcher::logging;
use image_fetcher::{Downloader, Session};

fn main() {
    logging::init_logging();

    let mut session = Session::new(Downloader::new());

    let stdin = io::stdin();
    if let Err(err) = session.run(stdin.lock(), io::stdout()) {
        eprintln!("image-fetcher error: {err}");
        std::process::exit(1);
    }
}
