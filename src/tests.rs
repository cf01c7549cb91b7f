use std::{collections::VecDeque, time::Duration};

use crate::{
    codec,
    connection::{AntennaPort, Connect, ReaderConnection, ReaderUri, Setting, TagRead},
    gen2::{MemoryBank, SelectError},
    read_plan::TagOp,
    ConfigError, Reader, ReaderConfig, ReaderError, TagIdentity,
};

#[derive(Clone, Debug, PartialEq)]
enum StubError {
    Refused,
    Timeout,
}

/// Hands out one scripted burst per `read` call and records every call.
#[derive(Default)]
struct Scripted {
    bursts: VecDeque<Result<Vec<TagRead>, StubError>>,
    settings: Vec<Setting>,
    reads: Vec<Duration>,
    reject_path: Option<&'static str>,
}

impl Scripted {
    fn new<I>(bursts: I) -> Self
    where
        I: IntoIterator<Item = Vec<TagRead>>,
    {
        Self {
            bursts: bursts.into_iter().map(Ok).collect(),
            ..Default::default()
        }
    }
}

impl ReaderConnection for Scripted {
    type Error = StubError;

    fn set(&mut self, setting: &Setting) -> Result<(), Self::Error> {
        if self.reject_path == Some(setting.path()) {
            return Err(StubError::Refused);
        }

        self.settings.push(setting.clone());
        Ok(())
    }

    fn read(&mut self, duration: Duration) -> Result<Vec<TagRead>, Self::Error> {
        self.reads.push(duration);
        self.bursts.pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

impl Connect for Scripted {
    fn connect(uri: &ReaderUri) -> Result<Self, Self::Error> {
        match uri {
            ReaderUri::Serial { .. } => Ok(Self::default()),
            ReaderUri::Network { .. } => Err(StubError::Refused),
        }
    }
}

fn antenna(n: u8) -> AntennaPort {
    AntennaPort::new(n).unwrap()
}

fn target() -> TagIdentity {
    TagIdentity::new(hex::decode("E2801170000002").unwrap(), antenna(1))
}

fn read_of(epc: &str, data: &[u8]) -> TagRead {
    TagRead::new(hex::decode(epc).unwrap(), antenna(1), data.to_vec())
}

const TARGET_EPC: &str = "E2801170000002";
const OTHER_EPC: &str = "300833B2DDD9014000000000";

#[test]
fn succeeds_after_empty_bursts() {
    let data = [0x12, 0x34, 0xAB, 0xCD];

    for k in 0..3 {
        let mut bursts = vec![Vec::new(); k];
        bursts.push(vec![read_of(TARGET_EPC, &data)]);

        let mut reader = Reader::new(Scripted::new(bursts));
        let values = reader
            .read_register_block(&target(), MemoryBank::User, 0, 2, 3)
            .unwrap();

        assert_eq!(values, codec::bytes_to_registers(&data).unwrap());
        assert_eq!(reader.inner_mut().reads.len(), k + 1);
    }
}

#[test]
fn matches_driver_reported_epc_string() {
    let mut seen = read_of(TARGET_EPC, &[0x00, 0x2A]);
    seen.epc_string = TARGET_EPC.to_lowercase();
    let tag = TagIdentity::from(&seen);

    let mut reader = Reader::new(Scripted::new(vec![vec![seen.clone()]; 3]));
    let values = reader
        .read_register_block(&tag, MemoryBank::User, 0, 1, 3)
        .unwrap();

    assert_eq!(values, vec![0x002A]);
    assert_eq!(reader.inner_mut().reads.len(), 1);
}

#[test]
fn not_found_after_all_attempts() {
    let bursts = vec![vec![read_of(OTHER_EPC, &[0x00, 0x01])]; 10];
    let mut reader = Reader::new(Scripted::new(bursts));

    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 1, 5)
        .unwrap_err();

    assert_eq!(
        err,
        ReaderError::TagNotFound {
            epc: TARGET_EPC.into(),
            attempts: 5
        }
    );
    assert_eq!(reader.inner_mut().reads.len(), 5);
}

#[test]
fn empty_data_keeps_retrying() {
    let bursts = vec![
        vec![read_of(OTHER_EPC, &[0xFF, 0xFF]), read_of(TARGET_EPC, &[])],
        vec![read_of(TARGET_EPC, &[0x00, 0x2A])],
    ];

    let mut reader = Reader::new(Scripted::new(bursts));
    let values = reader
        .read_register_block(&target(), MemoryBank::Tid, 2, 1, 3)
        .unwrap();

    assert_eq!(values, vec![0x002A]);
    assert_eq!(reader.inner_mut().reads.len(), 2);
}

#[test]
fn empty_data_only_is_not_found() {
    let bursts = vec![vec![read_of(TARGET_EPC, &[])]; 3];
    let mut reader = Reader::new(Scripted::new(bursts));

    let err = reader
        .read_register_block_default(&target(), MemoryBank::User, 0, 1)
        .unwrap_err();

    assert!(matches!(err, ReaderError::TagNotFound { attempts: 3, .. }));
    assert_eq!(reader.inner_mut().reads.len(), 3);
}

#[test]
fn zero_attempts_reads_nothing() {
    let mut reader = Reader::new(Scripted::new(vec![vec![read_of(TARGET_EPC, &[0, 1])]]));

    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 1, 0)
        .unwrap_err();

    assert!(matches!(err, ReaderError::TagNotFound { attempts: 0, .. }));
    assert!(reader.inner_mut().reads.is_empty());
}

#[test]
fn installs_singulating_plan() {
    let mut reader = Reader::new(Scripted::new(vec![vec![read_of(TARGET_EPC, &[0, 1])]]));
    reader
        .read_register_block(&target(), MemoryBank::User, 6, 1, 3)
        .unwrap();

    let settings = &reader.inner_mut().settings;
    assert_eq!(settings.len(), 1);

    let Setting::ReadPlan(plan) = &settings[0] else {
        panic!("Expected a read plan, got {:?}", settings[0]);
    };

    assert_eq!(plan.antennas, vec![antenna(1)]);
    assert_eq!(plan.filters.len(), 2);
    assert_eq!(plan.filters[1].mask(), target().epc());
    assert_eq!(
        plan.operation,
        Some(TagOp::ReadData {
            bank: MemoryBank::User,
            word_address: 6,
            word_count: 1
        })
    );
}

#[test]
fn reads_use_configured_read_time() {
    let bursts = vec![Vec::new(), vec![read_of(TARGET_EPC, &[0, 1])]];
    let mut reader =
        Reader::new(Scripted::new(bursts)).with_read_time(Duration::from_millis(150));

    reader.read_register(&target(), MemoryBank::User, 0, 3).unwrap();

    assert_eq!(reader.inner_mut().reads, vec![Duration::from_millis(150); 2]);
}

#[test]
fn read_register_is_first_of_block() {
    let data = [0xBE, 0xEF, 0x00, 0x01];

    let mut block = Reader::new(Scripted::new(vec![vec![read_of(TARGET_EPC, &data)]]));
    let mut single = Reader::new(Scripted::new(vec![vec![read_of(TARGET_EPC, &data)]]));

    let values = block
        .read_register_block(&target(), MemoryBank::User, 0, 1, 3)
        .unwrap();
    let value = single
        .read_register_default(&target(), MemoryBank::User, 0)
        .unwrap();

    assert_eq!(value, values[0]);
    assert_eq!(value, 0xBEEF);
}

#[test]
fn odd_length_data_is_malformed() {
    let bursts = vec![vec![read_of(TARGET_EPC, &[0x01, 0x02, 0x03])]];
    let mut reader = Reader::new(Scripted::new(bursts));

    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 2, 3)
        .unwrap_err();

    assert_eq!(err, ReaderError::MalformedData(codec::OddLength(3)));
}

#[test]
fn zero_words_rejected() {
    let mut reader = Reader::new(Scripted::default());

    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 0, 3)
        .unwrap_err();

    assert_eq!(err, ReaderError::InvalidArgument(SelectError::EmptyRead));
    assert!(reader.inner_mut().settings.is_empty());
}

#[test]
fn read_failure_is_communication_error() {
    let mut stub = Scripted::new(vec![Vec::new()]);
    stub.bursts.push_back(Err(StubError::Timeout));

    let mut reader = Reader::new(stub);
    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 1, 3)
        .unwrap_err();

    assert_eq!(err, ReaderError::Communication(StubError::Timeout));
    assert_eq!(reader.inner_mut().reads.len(), 2);
}

#[test]
fn plan_install_failure_is_communication_error() {
    let mut stub = Scripted::default();
    stub.reject_path = Some("/reader/read/plan");

    let mut reader = Reader::new(stub);
    let err = reader
        .read_register_block(&target(), MemoryBank::User, 0, 1, 3)
        .unwrap_err();

    assert_eq!(err, ReaderError::Communication(StubError::Refused));
    assert!(reader.inner_mut().reads.is_empty());
}

#[test]
fn establish_applies_config() {
    let config = ReaderConfig {
        antennas: vec![antenna(1), antenna(2)],
        ..Default::default()
    };

    let mut reader = Reader::<Scripted>::establish(&config).unwrap();

    assert_eq!(reader.read_time(), Duration::from_millis(150));
    assert_eq!(reader.inner_mut().settings, config.settings().unwrap());
}

#[test]
fn establish_connect_failure() {
    let config = ReaderConfig::new("tmr://10.0.0.1".parse().unwrap());

    let err = Reader::<Scripted>::establish(&config).err().unwrap();
    assert_eq!(err, ReaderError::Connect(StubError::Refused));
}

#[test]
fn configure_parameter_failure() {
    let mut stub = Scripted::default();
    stub.reject_path = Some("/reader/gen2/session");

    let mut reader = Reader::new(stub);
    let err = reader.configure(&ReaderConfig::default()).unwrap_err();

    assert_eq!(
        err,
        ReaderError::Parameter {
            path: "/reader/gen2/session",
            error: StubError::Refused
        }
    );
    assert_eq!(err.to_string(), "could not set /reader/gen2/session: Refused");
}

#[test]
fn configure_rejects_empty_antennas() {
    let config = ReaderConfig {
        antennas: Vec::new(),
        ..Default::default()
    };

    let mut reader = Reader::new(Scripted::default());
    let err = reader.configure(&config).unwrap_err();

    assert_eq!(err, ReaderError::InvalidConfig(ConfigError::NoAntennas));
    assert!(reader.inner_mut().settings.is_empty());
    assert_eq!(reader.read_time(), ReaderConfig::READ_TIME_PER_ANTENNA);
}
