//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;
use nanolayer_tools_github::http::{HttpRequest, HttpResponse, Method};
use nanolayer_tools_github::{Error, HttpTransport, Result};

/// Serves canned responses keyed by method and URL, recording every request.
#[derive(Default)]
pub struct MockTransport {
    routes: Vec<(Method, String, HttpResponse)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, url: &str, status: u16, body: impl Into<Bytes>) -> Self {
        self.routes
            .push((method, url.to_string(), HttpResponse::new(status, body)));
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());
        self.routes
            .iter()
            .find(|(method, url, _)| *method == request.method && *url == request.url)
            .map(|(_, _, response)| response.clone())
            .ok_or_else(|| Error::transport(&request.url, "connection refused"))
    }
}

/// A fixture entry: name, content, directory flag.
pub type Fixture<'a> = (&'a str, &'a [u8], bool);

/// A small release layout with a directory, a binary and a readme.
pub const LAYOUT: &[Fixture<'static>] = &[
    ("bin/", b"", true),
    ("bin/tool", b"#!/bin/sh\necho tool\n", false),
    ("README.md", b"# tool\n", false),
];

pub fn tar(entries: &[Fixture]) -> Vec<u8> {
    let mut builder = tar::Builder::new(Vec::new());
    for (name, content, is_dir) in entries {
        let mut header = tar::Header::new_gnu();
        if *is_dir {
            header.set_entry_type(tar::EntryType::Directory);
            header.set_mode(0o755);
        } else {
            header.set_entry_type(tar::EntryType::Regular);
            header.set_mode(0o644);
        }
        header.set_size(content.len() as u64);
        header.set_cksum();
        builder.append_data(&mut header, name, *content).unwrap();
    }
    builder.into_inner().unwrap()
}

pub fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn bzip2(data: &[u8]) -> Vec<u8> {
    let mut encoder = bzip2::write::BzEncoder::new(Vec::new(), bzip2::Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

pub fn zip(entries: &[Fixture]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);
    for (name, content, is_dir) in entries {
        if *is_dir {
            writer.add_directory(*name, options).unwrap();
        } else {
            writer.start_file(*name, options).unwrap();
            writer.write_all(content).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}
