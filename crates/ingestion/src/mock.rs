//! Mock 传感器节点
//!
//! 在没有串口设备时模拟 Arduino 的输出，用于 simulate 命令与测试。

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use contracts::{SensorId, SensorKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

/// 启动横幅
pub const BANNER: &str = "=== Arduino sensor node ===";

/// 格式提示
pub const FORMAT_HINT: &str = "Formato: <T|P> <id> <valor>";

/// Mock 节点配置
#[derive(Debug, Clone)]
pub struct MockTransmitterConfig {
    /// 轮流发送的传感器
    pub sensors: Vec<(SensorKind, SensorId)>,

    /// 记录条数，`None` 表示无限
    pub count: Option<u64>,

    /// 两条记录之间的间隔
    pub interval: Duration,

    /// 随机种子，`None` 时取系统熵
    pub seed: Option<u64>,

    /// 是否先发送横幅与格式提示
    pub banner: bool,
}

impl Default for MockTransmitterConfig {
    fn default() -> Self {
        let sensors = [
            (SensorKind::Thermal, "TEMP-001"),
            (SensorKind::Barometric, "PRES-105"),
        ]
        .into_iter()
        .filter_map(|(kind, id)| SensorId::new(id).ok().map(|id| (kind, id)))
        .collect();

        Self {
            sensors,
            count: Some(20),
            interval: Duration::from_secs(1),
            seed: None,
            banner: true,
        }
    }
}

/// Mock 传感器节点
///
/// 实现 `Read`，可直接交给 `LineChannel::attach`。
pub struct MockTransmitter {
    config: MockTransmitterConfig,
    rng: StdRng,
    frame: Vec<u8>,
    cursor: usize,
    sent: u64,
    banner_sent: bool,
}

impl MockTransmitter {
    /// 创建新的 Mock 节点
    pub fn new(config: MockTransmitterConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        debug!(sensors = config.sensors.len(), count = ?config.count, "mock transmitter created");

        Self {
            banner_sent: !config.banner,
            config,
            rng,
            frame: Vec::new(),
            cursor: 0,
            sent: 0,
        }
    }

    /// 固定种子、无间隔，便于测试
    pub fn seeded(seed: u64, count: u64) -> Self {
        Self::new(MockTransmitterConfig {
            count: Some(count),
            interval: Duration::ZERO,
            seed: Some(seed),
            ..Default::default()
        })
    }

    /// 已发送的记录条数
    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// 生成下一帧，数据发完后返回 false
    fn refill(&mut self) -> bool {
        self.frame.clear();
        self.cursor = 0;

        if !self.banner_sent {
            self.banner_sent = true;
            self.frame
                .extend_from_slice(format!("{BANNER}\r\n{FORMAT_HINT}\r\n").as_bytes());
            return true;
        }

        if self.config.sensors.is_empty() || self.config.count.is_some_and(|n| self.sent >= n) {
            return false;
        }

        if self.sent > 0 && !self.config.interval.is_zero() {
            thread::sleep(self.config.interval);
        }

        let line = self.next_record();
        trace!(line = %line.trim_end(), "mock record");
        self.frame.extend_from_slice(line.as_bytes());
        self.sent += 1;
        true
    }

    fn next_record(&mut self) -> String {
        let index = (self.sent % self.config.sensors.len() as u64) as usize;
        let (kind, id) = &self.config.sensors[index];

        match kind {
            SensorKind::Thermal => {
                let celsius: f32 = self.rng.random_range(15.0..35.0);
                format!("{} {} {:.1}\r\n", kind.tag(), id, celsius)
            }
            SensorKind::Barometric => {
                let pascal: i32 = self.rng.random_range(95_000..105_000);
                format!("{} {} {}\r\n", kind.tag(), id, pascal)
            }
        }
    }
}

impl Read for MockTransmitter {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.cursor >= self.frame.len() && !self.refill() {
            return Ok(0);
        }

        let remaining = &self.frame[self.cursor..];
        let n = remaining.len().min(buf.len());
        buf[..n].copy_from_slice(&remaining[..n]);
        self.cursor += n;
        Ok(n)
    }
}
