//! # Integration Tests
//!
//! 集成测试与端到端测试。
//!
//! 负责：
//! - 合约快照测试
//! - 行协议 e2e 测试（Cursor、回放文件、模拟节点，无需串口）

#[cfg(test)]
mod contract_tests {
    use contracts::{ContractError, Reading, SensorId, SensorKind, MAX_SENSOR_ID_LEN};

    #[test]
    fn test_contracts_compile() {
        let _ = contracts::ConfigVersion::V1;
    }

    #[test]
    fn test_identifier_bounds() {
        assert!(SensorId::new(&"A".repeat(MAX_SENSOR_ID_LEN)).is_ok());
        assert!(matches!(
            SensorId::new(&"A".repeat(MAX_SENSOR_ID_LEN + 1)),
            Err(ContractError::InvalidIdentifier { .. })
        ));
    }

    #[test]
    fn test_reading_kinds() {
        assert_eq!(Reading::Celsius(1.0).kind(), SensorKind::Thermal);
        assert_eq!(Reading::Pascal(1).kind(), SensorKind::Barometric);
    }
}

#[cfg(test)]
mod e2e_tests {
    use std::io::{Cursor, Write};

    use contracts::{CancelToken, ContractError, LineSource, Reading, SensorKind};
    use ingestion::{IngestionPipeline, LineChannel, LineOutcome, MockTransmitter};
    use registry::{Aggregate, OwningSequence, Sensor, SensorRegistry};

    fn feed(bytes: &'static [u8]) -> LineChannel {
        let mut channel = LineChannel::new();
        channel.attach("cursor", Cursor::new(bytes));
        channel
    }

    fn ingest_all(bytes: &'static [u8]) -> (SensorRegistry, ingestion::IngestionStats) {
        let mut channel = feed(bytes);
        let mut registry = SensorRegistry::new();
        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, &CancelToken::new())
            .unwrap();
        (registry, stats)
    }

    /// Cancels the shared token after a fixed number of lines
    struct CancelAfter {
        inner: LineChannel,
        token: CancelToken,
        remaining: usize,
    }

    impl LineSource for CancelAfter {
        fn read_line(&mut self, cancel: &CancelToken) -> Result<Option<String>, ContractError> {
            if self.remaining == 0 {
                self.token.cancel();
            } else {
                self.remaining -= 1;
            }
            self.inner.read_line(cancel)
        }

        fn is_open(&self) -> bool {
            self.inner.is_open()
        }

        fn close(&mut self) {
            self.inner.close();
        }
    }

    #[test]
    fn test_sequence_append_order_and_deep_copy() {
        let mut original = OwningSequence::new();
        for v in 0..100 {
            original.append(v);
        }
        assert_eq!(original.size(), 100);

        let mut visited = Vec::new();
        original.for_each(|v| visited.push(*v));
        assert_eq!(visited, (0..100).collect::<Vec<_>>());

        let mut copy = original.clone();
        copy.clear();
        assert_eq!(original.size(), 100);
        assert_eq!(original.head(), Some(&0));
    }

    #[test]
    fn test_unknown_sensor_registers_then_appends() {
        let mut registry = SensorRegistry::new();
        let mut pipeline = IngestionPipeline::new();

        pipeline.ingest_line(&mut registry, "T TEMP-1 23.5");
        assert_eq!(registry.len(), 1);
        let sensor = registry.lookup("TEMP-1").unwrap();
        assert_eq!(sensor.kind(), SensorKind::Thermal);
        assert_eq!(sensor.report().readings, vec![Reading::Celsius(23.5)]);

        pipeline.ingest_line(&mut registry, "T TEMP-1 24.0");
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("TEMP-1").unwrap().len(), 2);
    }

    #[test]
    fn test_variant_mismatch_is_discarded() {
        let mut registry = SensorRegistry::new();
        let mut pipeline = IngestionPipeline::new();

        pipeline.ingest_line(&mut registry, "T TEMP-1 23.5");
        let outcome = pipeline.ingest_line(&mut registry, "P TEMP-1 10");

        assert!(matches!(
            outcome,
            LineOutcome::Rejected(ContractError::VariantMismatch { .. })
        ));
        let sensor = registry.lookup("TEMP-1").unwrap();
        assert_eq!(sensor.report().readings, vec![Reading::Celsius(23.5)]);
    }

    #[test]
    fn test_missing_value_leaves_registry_unchanged() {
        let mut registry = SensorRegistry::new();
        let outcome = IngestionPipeline::new().ingest_line(&mut registry, "T TEMP-2");

        assert!(matches!(
            outcome,
            LineOutcome::Rejected(ContractError::Format { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_tag_leaves_registry_unchanged() {
        let mut registry = SensorRegistry::new();
        let outcome = IngestionPipeline::new().ingest_line(&mut registry, "X ID 1");

        assert!(matches!(
            outcome,
            LineOutcome::Rejected(ContractError::UnknownKind { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup_case_sensitive_after_ingestion() {
        let (registry, _) = ingest_all(b"T Temp-1 20.0\n");
        assert!(registry.lookup("Temp-1").is_some());
        assert!(registry.lookup("TEMP-1").is_none());
        assert!(registry.lookup("missing").is_none());
    }

    #[test]
    fn test_framing_over_mixed_terminators() {
        let mut channel = feed(b"a\r\nb\n\n\rc");
        let cancel = CancelToken::new();
        assert_eq!(channel.read_line(&cancel).unwrap().as_deref(), Some("a"));
        assert_eq!(channel.read_line(&cancel).unwrap().as_deref(), Some("b"));
        assert_eq!(channel.read_line(&cancel).unwrap().as_deref(), Some("c"));
        assert_eq!(channel.read_line(&cancel).unwrap(), None);
    }

    #[test]
    fn test_arduino_capture_end_to_end() {
        let (registry, stats) = ingest_all(
            b"=== Arduino sensor node ===\r\n\
              Formato: <T|P> <id> <valor>\r\n\
              T TEMP-001 23.5\r\n\
              P PRES-105 101\r\n\
              T TEMP-001 21.0\r\n\
              P PRES-105 102\r\n\
              P TEMP-001 5\r\n\
              Z BAD 1\r\n\
              T TEMP-001\r\n",
        );

        assert_eq!(stats.lines_received, 9);
        assert_eq!(stats.lines_skipped, 2);
        assert_eq!(stats.records_accepted, 4);
        assert_eq!(stats.sensors_registered, 2);
        assert_eq!(stats.variant_mismatches, 1);
        assert_eq!(stats.unknown_kinds, 1);
        assert_eq!(stats.format_errors, 1);

        let results = registry.process_all();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, "TEMP-001");
        assert_eq!(results[0].1, Aggregate::Minimum(21.0));
        assert_eq!(results[1].0, "PRES-105");
        assert_eq!(results[1].1, Aggregate::Mean(101.5));
    }

    #[test]
    fn test_cancellation_stops_run() {
        let token = CancelToken::new();
        let mut source = CancelAfter {
            inner: feed(b"T A 1.0\nT A 2.0\nT A 3.0\nT A 4.0\n"),
            token: token.clone(),
            remaining: 2,
        };
        let mut registry = SensorRegistry::new();

        let stats = IngestionPipeline::new()
            .run(&mut source, &mut registry, &token)
            .unwrap();

        assert!(token.is_cancelled());
        assert_eq!(stats.records_accepted, 2);
        assert_eq!(registry.lookup("A").unwrap().len(), 2);
    }

    #[test]
    fn test_simulated_node_round_robin() {
        let mut channel = LineChannel::new();
        channel.attach("simulator", MockTransmitter::seeded(11, 10));
        let mut registry = SensorRegistry::new();

        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, &CancelToken::new())
            .unwrap();

        assert_eq!(stats.lines_skipped, 2);
        assert_eq!(stats.records_accepted, 10);
        assert_eq!(stats.rejected(), 0);
        assert_eq!(registry.lookup("TEMP-001").unwrap().len(), 5);
        assert_eq!(registry.lookup("PRES-105").unwrap().len(), 5);

        match registry.lookup("TEMP-001").unwrap().process() {
            Aggregate::Minimum(v) => assert!((15.0..=35.0).contains(&v)),
            other => panic!("unexpected aggregate {other:?}"),
        }
    }

    #[test]
    fn test_replay_file_with_configured_sensors() {
        let mut config = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        config
            .write_all(b"[[sensors]]\nid = \"PRES-105\"\nkind = \"barometric\"\n")
            .unwrap();
        let blueprint = config_loader::ConfigLoader::load_from_path(config.path()).unwrap();

        let mut capture = tempfile::NamedTempFile::new().unwrap();
        capture
            .write_all(b"T PRES-105 20.0\nP PRES-105 100\nP PRES-105 300\n")
            .unwrap();

        let mut registry = SensorRegistry::from_blueprint(&blueprint);
        let mut channel = LineChannel::new();
        channel.attach("capture", std::fs::File::open(capture.path()).unwrap());

        let stats = IngestionPipeline::new()
            .run(&mut channel, &mut registry, &CancelToken::new())
            .unwrap();

        assert_eq!(stats.sensors_registered, 0);
        assert_eq!(stats.variant_mismatches, 1);
        assert_eq!(registry.len(), 1);
        assert_eq!(
            registry.lookup("PRES-105").unwrap().process(),
            Aggregate::Mean(200.0)
        );
    }

    #[test]
    fn test_config_duplicate_ids_and_baud_fallback() {
        let duplicate = "[[sensors]]\nid = \"A\"\nkind = \"thermal\"\n\n\
                         [[sensors]]\nid = \"A\"\nkind = \"barometric\"\n";
        assert!(config_loader::ConfigLoader::load_from_str(
            duplicate,
            config_loader::ConfigFormat::Toml
        )
        .is_err());

        let blueprint = config_loader::ConfigLoader::load_from_str(
            "[channel]\nbaud_rate = 31337\n",
            config_loader::ConfigFormat::Toml,
        )
        .unwrap();
        assert!(!blueprint.channel.baud_rate_supported());
        assert_eq!(
            blueprint.channel.params().baud_rate,
            contracts::BaudRate::B9600
        );
    }
}
