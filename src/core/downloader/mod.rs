mod client;

pub use client::{sha1_file, DownloadOutcome, DownloadTarget, Downloader, FetchReason};
