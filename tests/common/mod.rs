//! Synthetic SOR image builder shared by the integration tests.
#![allow(dead_code)]

use sor_rs::parsing::Crc16;

/// Little-endian byte sink.
#[derive(Default)]
pub struct Le(pub Vec<u8>);

impl Le {
    pub fn u16(&mut self, v: u16) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn i16(&mut self, v: i16) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn u32(&mut self, v: u32) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn i32(&mut self, v: i32) -> &mut Self {
        self.0.extend_from_slice(&v.to_le_bytes());
        self
    }
    pub fn cstr(&mut self, s: &str) -> &mut Self {
        self.0.extend_from_slice(s.as_bytes());
        self.0.push(0);
        self
    }
    pub fn raw(&mut self, b: &[u8]) -> &mut Self {
        self.0.extend_from_slice(b);
        self
    }
}

#[derive(Clone)]
pub struct TestEvent {
    pub id: u16,
    pub distance_raw: u32,
    pub slope_raw: i16,
    pub splice_raw: i16,
    pub reflection_raw: i32,
    pub event_type: [u8; 8],
    pub comment: String,
}

/// Describes a synthetic SOR file. `build()` produces a byte image with a
/// correct trailing checksum.
#[derive(Clone)]
pub struct SorBuilder {
    pub format: u8,
    /// Block names in map order. "Cksum" should stay last.
    pub order: Vec<String>,
    pub samples: Vec<u16>,
    pub num_traces: i16,
    pub scale_code: u16,
    pub timestamp: u32,
    pub unit: [u8; 2],
    /// Sample spacing in 1e-8 microseconds.
    pub sample_spacing_raw: u32,
    /// Index of refraction in 1e-5 units.
    pub ior_raw: u32,
    pub events: Vec<TestEvent>,
    /// Body of an extra block named "VendorInfo", if listed in `order`.
    pub vendor_body: Vec<u8>,
}

pub const STANDARD_ORDER: [&str; 6] = [
    "GenParams",
    "SupParams",
    "FxdParams",
    "DataPts",
    "KeyEvents",
    "Cksum",
];

impl SorBuilder {
    pub fn new(format: u8) -> Self {
        Self {
            format,
            order: STANDARD_ORDER.iter().map(|s| s.to_string()).collect(),
            samples: vec![100, 150, 50],
            num_traces: 1,
            scale_code: 1000,
            timestamp: 1_000_000_000,
            unit: *b"km",
            sample_spacing_raw: 1_000_000,
            ior_raw: 150_000,
            events: vec![
                TestEvent {
                    id: 1,
                    distance_raw: 50_000,
                    slope_raw: 350,
                    splice_raw: -120,
                    reflection_raw: -45_000,
                    event_type: *b"1F9999LS",
                    comment: "connector".into(),
                },
                TestEvent {
                    id: 2,
                    distance_raw: 100_000,
                    slope_raw: 0,
                    splice_raw: 0,
                    reflection_raw: 0,
                    event_type: *b"0E9999LS",
                    comment: String::new(),
                },
            ],
            vendor_body: b"opaque vendor data".to_vec(),
        }
    }

    pub fn v2(&self) -> bool {
        self.format == 2
    }

    fn tagged(&self, name: &str, body: Vec<u8>) -> Vec<u8> {
        if self.v2() {
            let mut out = Le::default();
            out.cstr(name).raw(&body);
            out.0
        } else {
            body
        }
    }

    fn gen_params(&self) -> Vec<u8> {
        let mut b = Le::default();
        b.raw(b"EN").cstr("CABLE-7").cstr("F12");
        if self.v2() {
            b.u16(652);
        }
        b.u16(1550)
            .cstr("Central Office")
            .cstr("Street Cabinet")
            .cstr("SMF-28")
            .raw(b"BC")
            .i32(-25);
        if self.v2() {
            b.i32(40);
        }
        b.cstr("J. Doe").cstr("acceptance test");
        b.0
    }

    fn sup_params(&self) -> Vec<u8> {
        let mut b = Le::default();
        for s in ["Acme", "OTDR-9000", "SN123", "MOD-1", "SN456", "fw 1.2.3", "none"] {
            b.cstr(s);
        }
        b.0
    }

    fn fxd_params(&self) -> Vec<u8> {
        let n = self.samples.len() as u32;
        let mut b = Le::default();
        b.u32(self.timestamp).raw(&self.unit).u16(15500).i32(-100);
        if self.v2() {
            b.i32(-200);
        }
        b.u16(1).u16(30).u32(self.sample_spacing_raw).u32(n).u32(self.ior_raw).u16(800).u32(600);
        if self.v2() {
            b.u16(300);
        }
        b.u32(50_000);
        if self.v2() {
            b.i32(7);
        }
        b.i32(0).u16(20_000).i16(1000).u16(0).u16(50).u16(40_000).u16(3000);
        if self.v2() {
            b.raw(b"ST").i32(1).i32(2).i32(3).i32(4);
        }
        b.0
    }

    fn data_pts(&self) -> Vec<u8> {
        let n = self.samples.len() as u32;
        let mut b = Le::default();
        b.u32(n).i16(self.num_traces).u32(n).u16(self.scale_code);
        for &s in &self.samples {
            b.u16(s);
        }
        b.0
    }

    fn key_events(&self) -> Vec<u8> {
        let mut b = Le::default();
        b.u16(self.events.len() as u16);
        for ev in &self.events {
            b.u16(ev.id)
                .u32(ev.distance_raw)
                .i16(ev.slope_raw)
                .i16(ev.splice_raw)
                .i32(ev.reflection_raw)
                .raw(&ev.event_type);
            if self.v2() {
                b.raw(&[0u8; 20]);
            }
            b.cstr(&ev.comment);
        }
        b.i32(1234).i32(-10).u32(100_000).u16(45_500).i32(0).u32(100_000);
        b.0
    }

    fn body(&self, name: &str) -> Vec<u8> {
        let body = match name {
            "GenParams" => self.gen_params(),
            "SupParams" => self.sup_params(),
            "FxdParams" => self.fxd_params(),
            "DataPts" => self.data_pts(),
            "KeyEvents" => self.key_events(),
            "Cksum" => Vec::new(),
            _ => self.vendor_body.clone(),
        };
        let mut full = self.tagged(name, body);
        if name == "Cksum" {
            // placeholder for the stored value
            full.extend_from_slice(&[0, 0]);
        }
        full
    }

    pub fn build(&self) -> Vec<u8> {
        let bodies: Vec<(String, Vec<u8>)> = self
            .order
            .iter()
            .map(|name| (name.clone(), self.body(name)))
            .collect();

        let entries_len: usize = bodies.iter().map(|(n, _)| n.len() + 1 + 2 + 4).sum();
        let map_size = if self.v2() { 4 } else { 0 } + 2 + 4 + 2 + entries_len;

        let mut out = Le::default();
        if self.v2() {
            out.cstr("Map");
        }
        out.u16(if self.v2() { 200 } else { 100 })
            .u32(map_size as u32)
            .u16(bodies.len() as u16 + 1);
        for (name, body) in &bodies {
            out.cstr(name)
                .u16(if self.v2() { 200 } else { 100 })
                .u32(body.len() as u32);
        }
        assert_eq!(out.0.len(), map_size);

        for (_, body) in &bodies {
            out.raw(body);
        }

        let mut bytes = out.0;
        if self.order.last().map(String::as_str) == Some("Cksum") {
            let len = bytes.len();
            let crc = Crc16::checksum(&bytes[..len - 2]);
            bytes[len - 2..].copy_from_slice(&crc.to_le_bytes());
        }
        bytes
    }
}

/// Offset of the last occurrence of `needle` (block tags appear after the map).
pub fn rfind(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).rposition(|w| w == needle)
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
