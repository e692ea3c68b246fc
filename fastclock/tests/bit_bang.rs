// Licensed under the Apache-2.0 license

//! Timing scenarios as bus drivers use them: an embedded-hal driver on top of
//! the busy-wait delays, a fixed-period waveform, and reads racing an
//! interrupt handler.

use embedded_hal::delay::DelayNs;
use fastclock::{
    config::ESP32_TIMG0, ClockReader, CycleDelay, Delay, InterruptControl, MultiDelay, TimerCycles,
};
use fastclock_emulator::{
    EmulatedCycleCounter, EmulatedInterrupts, EmulatedTimer, EmulatedTimerGroup,
};

/// Reset pulse of a one-wire bus: drive low, wait, release, sample.
fn test_helper_reset_pulse<D: DelayNs>(delay: &mut D, events: &mut Vec<&'static str>) {
    events.push("low");
    delay.delay_us(480);
    events.push("release");
    delay.delay_us(70);
    events.push("sample");
}

#[test]
fn test_embedded_hal_driver_on_timer_delay() {
    let group = EmulatedTimerGroup::new();
    group.micros_timer().set_step_per_latch(1);
    let mut delay = Delay::new(ClockReader::new(group.micros_timer(), group.millis_timer()));

    let mut events = Vec::new();
    test_helper_reset_pulse(&mut delay, &mut events);

    assert_eq!(events, ["low", "release", "sample"]);
    // Each wait costs one extra read to take its start time.
    assert_eq!(group.micros_timer().count(), 480 + 1 + 70 + 1);
}

#[test]
fn test_embedded_hal_driver_on_cycle_delay() {
    let counter = EmulatedCycleCounter::new(160);
    counter.set_step_per_read(4);
    let mut delay = CycleDelay::with_overhead(&counter, 0);

    let mut events = Vec::new();
    test_helper_reset_pulse(&mut delay, &mut events);

    let elapsed = counter.peek();
    assert!(elapsed >= (480 + 70) * 160);
    assert!(elapsed <= (480 + 70) * 160 + 4 * 4);
}

#[test]
fn test_square_wave_has_no_drift() {
    let counter = EmulatedCycleCounter::new(80);
    counter.set_step_per_read(3);
    let wave = MultiDelay::new(&counter);

    let mut edges = Vec::new();
    for half_period in 1..=50u32 {
        wave.wait_until_us(half_period * 10);
        // Toggling the pin takes a while.
        counter.advance(17);
        edges.push(wave.elapsed_cycles());
    }

    // Every edge lands within one read step plus the toggle cost of its
    // ideal position, however many came before it.
    for (i, &edge) in edges.iter().enumerate() {
        let ideal = (i as i32 + 1) * 10 * 80;
        assert!(edge >= ideal, "edge {} early: {}", i, edge);
        assert!(edge < ideal + 3 + 17 + 3, "edge {} late: {}", i, edge);
    }
}

#[test]
fn test_timer_cycles_fallback_drives_multi_delay() {
    let timer = EmulatedTimer::new();
    timer.set_step_per_latch(1);
    let delay = MultiDelay::new(TimerCycles::new(&timer));
    delay.wait_until_us(25);
    delay.wait_until_us(50);
    assert_eq!(timer.count(), 51);
}

#[test]
fn test_millis_survives_interrupt_at_high_word_carry() {
    // The ms tick counter is about to carry into its high word.
    let group = EmulatedTimerGroup::starting_at(0, 0xFFFF_FFFF);
    let clock = ClockReader::new(group.micros_timer(), group.millis_timer());

    group.millis_timer().inject_interrupt_before_high_read(1);
    assert_eq!(clock.millis64(), 0x8000_0000);

    group.millis_timer().inject_interrupt_before_high_read(2);
    assert_eq!(clock.millis64(), 0x8000_0001);
}

#[test]
fn test_micros64_in_critical_section() {
    let group = EmulatedTimerGroup::starting_at(0x7_0000_0100, 0);
    let clock = ClockReader::new(group.micros_timer(), group.millis_timer());
    let reading = critical_section::with(|cs| clock.micros64_in_critical_section(cs));
    assert_eq!(reading, 0x7_0000_0100);
    assert_eq!(group.micros_timer().latch_count(), 1);
}

#[test]
fn test_delays_from_board_config() {
    let counter = EmulatedCycleCounter::new(ESP32_TIMG0.cpu_mhz);
    let delay = CycleDelay::with_overhead(&counter, ESP32_TIMG0.cycle_delay_overhead);
    delay.delay_us(1);
    // 240 cycles less 12 of overhead, plus the read that sees the deadline.
    assert_eq!(counter.peek(), 240 - 12 + 1);

    let group = EmulatedTimerGroup::new();
    group.micros_timer().set_step_per_latch(1);
    let interrupts = EmulatedInterrupts::with_probe(group.micros_timer());
    let delay = Delay::with_window(
        ClockReader::new(group.micros_timer(), group.millis_timer()),
        ESP32_TIMG0.interruptible_window_us,
    );
    delay.delay_us_interruptible(&interrupts, 100);
    assert_eq!(interrupts.masked_at(), Some(81));
    assert!(!interrupts.are_enabled());
}
