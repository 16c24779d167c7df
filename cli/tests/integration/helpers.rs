//! Shared fixtures for spawning the binary.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temp workspace with its own config file.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config_path(&self) -> PathBuf {
        self.path().join("config.yaml")
    }

    pub fn models_dir(&self) -> PathBuf {
        self.path().join("models")
    }

    pub fn write_config(&self, yaml: &str) {
        std::fs::write(self.config_path(), yaml).expect("write config");
    }

    /// `reachy-lab` running inside the sandbox with colors off.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("reachy-lab").expect("reachy-lab binary should exist");
        cmd.current_dir(self.path())
            .env("REACHY_LAB_CONFIG", self.config_path())
            .env("NO_COLOR", "1")
            .env_remove("CI");
        cmd
    }
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    listener.local_addr().expect("addr").port()
}

/// Serve `body` to exactly one HTTP request, then stop. Returns the URL.
pub fn serve_once(body: Vec<u8>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    std::thread::spawn(move || {
        let Ok((mut stream, _)) = listener.accept() else {
            return;
        };
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut buf) {
                Ok(0) | Err(_) => return,
                Ok(n) => request.extend_from_slice(&buf[..n]),
            }
        }
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).ok();
        stream.write_all(&body).ok();
    });
    format!("http://127.0.0.1:{port}/model.zip")
}

/// A zip laid out like the speech model: one root folder with the
/// directories the provisioner checks for.
pub fn model_zip(root: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let options = zip::write::FileOptions::default();
    for entry in ["am", "conf", "graph", "ivector"] {
        zip.add_directory(format!("{root}/{entry}/"), options)
            .expect("add dir");
    }
    zip.start_file(format!("{root}/conf/model.conf"), options)
        .expect("start file");
    zip.write_all(b"--sample-frequency=16000\n").expect("write");
    zip.finish().expect("finish zip").into_inner()
}
