//! Shared fixtures for the scrape tests.

#![allow(dead_code)]

use digitalocean_exporter::api::mock::MockApi;
use digitalocean_exporter::api::{
    Account, Domain, DomainRecord, Droplet, FloatingIp, Image, Key, LoadBalancer, Region, Size,
    Snapshot, Volume,
};
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub fn region(slug: &str) -> Region {
    Region {
        slug: slug.to_string(),
        name: slug.to_uppercase(),
    }
}

pub fn droplet(id: &str, status: &str) -> Droplet {
    Droplet {
        id: id.to_string(),
        name: format!("{}-host", id),
        memory: 1024,
        vcpus: 1,
        disk: 25,
        status: status.to_string(),
        region: region("nyc3"),
        size: Size {
            slug: "s-1vcpu-1gb".to_string(),
            price_monthly: 5.0,
            price_hourly: 0.00744,
        },
        ..Default::default()
    }
}

/// An inventory with at least one item for every resource type.
pub fn populated() -> MockApi {
    MockApi {
        account: Account {
            email_verified: true,
            droplet_limit: 25,
            floating_ip_limit: 3,
            volume_limit: 10,
            status: "active".to_string(),
            ..Default::default()
        },
        droplets: vec![droplet("d1", "active"), droplet("d2", "off")],
        volumes: vec![Volume {
            id: "vol-1".to_string(),
            name: "data".to_string(),
            region: region("nyc3"),
            size_gigabytes: 100.0,
            droplet_ids: vec![1],
        }],
        load_balancers: vec![LoadBalancer {
            id: "lb-1".to_string(),
            name: "frontend".to_string(),
            ip: "203.0.113.10".to_string(),
            status: "active".to_string(),
            region: region("nyc3"),
            droplet_ids: vec![1, 2],
        }],
        domains: vec![Domain {
            name: "example.com".to_string(),
            ttl: 1800,
        }],
        domain_records: vec![(
            "example.com".to_string(),
            DomainRecord {
                id: "28448429".to_string(),
                record_type: "MX".to_string(),
                name: "@".to_string(),
                data: "mail.example.com".to_string(),
                priority: Some(10),
                ttl: 1800,
                ..Default::default()
            },
        )],
        images: vec![Image {
            id: "img-1".to_string(),
            name: "golden".to_string(),
            image_type: "snapshot".to_string(),
            distribution: "Ubuntu".to_string(),
            regions: vec!["nyc3".to_string()],
            min_disk_size: 20,
            size_gigabytes: 1.5,
        }],
        keys: vec![Key {
            id: "512189".to_string(),
            name: "laptop".to_string(),
            fingerprint: "3b:16:bf:e4".to_string(),
        }],
        snapshots: vec![Snapshot {
            id: "snap-1".to_string(),
            name: "nightly".to_string(),
            regions: vec!["nyc3".to_string()],
            resource_id: "d1".to_string(),
            resource_type: "droplet".to_string(),
            min_disk_size: 25,
            size_gigabytes: 2.0,
        }],
        floating_ips: vec![FloatingIp {
            ip: "198.51.100.7".to_string(),
            region: region("nyc3"),
            droplet: None,
            locked: false,
        }],
        ..Default::default()
    }
}

/// Collects formatted log output in memory.
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap();
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

pub struct CaptureWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = CaptureWriter;

    fn make_writer(&'a self) -> Self::Writer {
        CaptureWriter {
            buffer: Arc::clone(&self.buffer),
        }
    }
}

/// Install a thread-local subscriber writing into a fresh capture.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
