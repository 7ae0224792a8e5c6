// One-tick sampling against a scripted source

mod common;

use common::{FakeSource, sampler_config};
use std::path::PathBuf;
use sysdash::models::Capacity;
use std::time::{Duration, Instant};
use sysdash::sampler::{Sampler, SamplerConfig};

fn source() -> FakeSource {
    FakeSource {
        memory: Some(Capacity {
            total: 16_000_000_000,
            free: 4_000_000_000,
        }),
        disks: vec![(
            PathBuf::from("/"),
            Capacity {
                total: 100_000_000_000,
                free: 30_000_000_000,
            },
        )],
        interfaces: vec!["eth0".into()],
        temperature: Some(47.3),
        ..FakeSource::default()
    }
}

#[tokio::test]
async fn test_ram_and_disk_usage_are_instant_ratios() {
    let mut sampler = Sampler::new(source(), sampler_config());
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.ram_percent, 75.0);
    assert_eq!(snapshot.disk_percent, 70.0);
    assert_eq!(snapshot.disk_volume, "/");
}

#[tokio::test]
async fn test_first_tick_settles_cpu_and_reports_measured_value() {
    let source = source().cpu([Some((1000, 1000)), Some((2000, 1250))]);
    let mut sampler = Sampler::new(source, sampler_config());
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.cpu_percent, 75.0);
}

#[tokio::test]
async fn test_later_ticks_read_cpu_once() {
    let source = source().cpu([
        Some((1000, 1000)),
        Some((2000, 1250)),
        Some((3000, 2250)),
    ]);
    let mut sampler = Sampler::new(source, sampler_config());
    sampler.tick().await;
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.cpu_percent, 0.0);
}

#[tokio::test]
async fn test_cpu_settle_pauses_only_the_first_tick() {
    let source = source().cpu([
        Some((1000, 1000)),
        Some((2000, 1250)),
        Some((3000, 2000)),
    ]);
    let settle = Duration::from_millis(300);
    let config = SamplerConfig {
        cpu_settle: settle,
        ..sampler_config()
    };
    let mut sampler = Sampler::new(source, config);

    let started = Instant::now();
    sampler.tick().await;
    assert!(started.elapsed() >= settle);

    let started = Instant::now();
    let snapshot = sampler.tick().await;
    assert!(started.elapsed() < settle);
    assert_eq!(snapshot.cpu_percent, 25.0);
}

#[tokio::test]
async fn test_network_rate_floor_comes_from_config() {
    let source = source().network([Some((0, 0)), Some((512, 0))]);
    let config = SamplerConfig {
        rate_floor: Duration::from_millis(500),
        ..sampler_config()
    };
    let mut sampler = Sampler::new(source, config);
    sampler.tick().await;
    let snapshot = sampler.tick().await;
    // back-to-back ticks: elapsed is floored to 500 ms, so 512 B reads as 1 KB/s.
    assert_eq!(snapshot.net_sent_kbps, 1.0);
}

#[tokio::test]
async fn test_cpu_failure_degrades_one_tick_only() {
    let source = source().cpu([
        Some((1000, 1000)),
        Some((2000, 1500)),
        None,
        Some((3000, 1600)),
    ]);
    let mut sampler = Sampler::new(source, sampler_config());
    assert_eq!(sampler.tick().await.cpu_percent, 50.0);
    assert_eq!(sampler.tick().await.cpu_percent, 0.0);
    // measured against (2000, 1500), the last good reading.
    assert_eq!(sampler.tick().await.cpu_percent, 90.0);
}

#[tokio::test]
async fn test_failed_priming_read_retries_next_tick() {
    let source = source().cpu([None, Some((100, 100)), Some((200, 150))]);
    let mut sampler = Sampler::new(source, sampler_config());
    assert_eq!(sampler.tick().await.cpu_percent, 0.0);
    assert_eq!(sampler.tick().await.cpu_percent, 50.0);
}

#[tokio::test]
async fn test_network_rates_are_kilobytes_per_second() {
    let source = source().network([Some((0, 0)), Some((2048, 10_240))]);
    let mut sampler = Sampler::new(source, sampler_config());
    let first = sampler.tick().await;
    assert_eq!((first.net_sent_kbps, first.net_recv_kbps), (0.0, 0.0));

    // the two ticks are far less than a second apart, so the elapsed floor applies.
    let second = sampler.tick().await;
    assert_eq!(second.net_sent_kbps, 2.0);
    assert_eq!(second.net_recv_kbps, 10.0);
}

#[tokio::test]
async fn test_network_reads_the_discovered_interface() {
    let mut sampler = Sampler::new(source().network([Some((1, 1))]), sampler_config());
    assert_eq!(sampler.interface(), Some("eth0"));
    sampler.tick().await;
    assert_eq!(sampler.source().network_reads, vec!["eth0".to_string()]);
}

#[tokio::test]
async fn test_configured_interface_is_preferred() {
    let mut fake = source();
    fake.interfaces = vec!["eth0".into(), "wlan0".into()];
    let mut config = sampler_config();
    config.network_interface = Some("wlan0".into());
    let sampler = Sampler::new(fake, config);
    assert_eq!(sampler.interface(), Some("wlan0"));
}

#[tokio::test]
async fn test_no_interface_reports_zero_throughput() {
    let mut fake = source().network([Some((0, 0)), Some((4096, 4096))]);
    fake.interfaces.clear();
    let mut sampler = Sampler::new(fake, sampler_config());
    sampler.tick().await;
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.net_sent_kbps, 0.0);
    assert_eq!(snapshot.net_recv_kbps, 0.0);
}

#[tokio::test]
async fn test_gpu_uses_the_settled_second_read() {
    let mut fake = source();
    fake.gpu = [Some(3.0), Some(42.0), Some(5.0), Some(150.0)].into();
    let mut sampler = Sampler::new(fake, sampler_config());
    assert_eq!(sampler.tick().await.gpu_percent, 42.0);
    assert_eq!(sampler.tick().await.gpu_percent, 100.0);
}

#[tokio::test]
async fn test_missing_gpu_reads_zero() {
    let mut sampler = Sampler::new(source(), sampler_config());
    assert_eq!(sampler.tick().await.gpu_percent, 0.0);
}

#[tokio::test]
async fn test_unavailable_sources_degrade_to_zero_and_na() {
    let mut sampler = Sampler::new(FakeSource::default(), sampler_config());
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.cpu_percent, 0.0);
    assert_eq!(snapshot.ram_percent, 0.0);
    assert_eq!(snapshot.disk_percent, 0.0);
    assert_eq!(snapshot.gpu_percent, 0.0);
    assert_eq!(snapshot.net_sent_kbps, 0.0);
    assert_eq!(snapshot.cpu_temperature, "N/A");
}

#[tokio::test]
async fn test_snapshot_carries_identity_and_display_strings() {
    let mut sampler = Sampler::new(source(), sampler_config());
    let snapshot = sampler.tick().await;
    assert_eq!(snapshot.host_name, "testbox");
    assert_eq!(snapshot.os_description, "TestOS 1.0");
    assert_eq!(snapshot.uptime, "00:00:00");
    assert_eq!(snapshot.cpu_temperature, "47.3");
}

#[tokio::test]
async fn test_histories_follow_ticks() {
    let source = source().cpu([Some((0, 0)), Some((100, 50)), Some((200, 100))]);
    let mut sampler = Sampler::new(source, sampler_config());
    let first = sampler.tick().await;
    let second = sampler.tick().await;

    let frame = sampler.frame(&second);
    assert_eq!(frame.cpu_history.values().collect::<Vec<_>>(), vec![first.cpu_percent, 50.0]);
    assert_eq!(frame.ram_history.values().collect::<Vec<_>>(), vec![75.0, 75.0]);
    assert_eq!(frame.gpu_history.len(), 2);
}

#[tokio::test]
async fn test_history_window_is_bounded_by_config() {
    let mut config = sampler_config();
    config.history_len = 3;
    let mut sampler = Sampler::new(source(), config);
    let mut last = None;
    for _ in 0..8 {
        last = Some(sampler.tick().await);
    }
    let snapshot = last.unwrap();
    let frame = sampler.frame(&snapshot);
    assert_eq!(frame.ram_history.len(), 3);
    assert_eq!(frame.cpu_history.capacity(), 3);
}
