//! Testing utilities and mock implementations
//!
//! Mocks for the clock, regulator, register map, device tree and MAC core
//! so the glue can be exercised on the host. Every mock created by one
//! [`MockDeviceNode`] records its hardware transitions into one shared
//! [`EventLog`], which lets tests assert on the exact sequence.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::driver::config::{PlatformData, Speed};
use crate::driver::error::{
    ClockError, ClockResult, ProbeError, ProbeResult, RegmapError, RegmapResult, RegulatorError,
    RegulatorResult, Result,
};
use crate::driver::glue::PlatformCallbacks;
use crate::driver::probe::MacCore;
use crate::hal::clock::{ClockGate, ClockState, TxClock};
use crate::hal::of::DeviceNode;
use crate::hal::regmap::Regmap;
use crate::hal::regulator::Regulator;

// =============================================================================
// Event Log
// =============================================================================

/// MAC core entry point, as recorded by [`MockMacCore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreStep {
    GetResources,
    ConfigDt,
    RemoveConfigDt,
    Probe,
    Remove,
    Suspend,
    Resume,
    LinkUp(u32),
}

/// One observable hardware transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    ClkPrepare,
    ClkUnprepare,
    ClkEnable,
    ClkDisable,
    ClkSetRate(u32),
    /// Register offset, new value
    RegWrite(u32, u32),
    RegulatorEnable,
    RegulatorDisable,
    Core(CoreStep),
}

/// Shared, ordered record of [`Event`]s
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<Event>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    /// Snapshot of all events so far
    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }

    /// Number of occurrences of `event`
    pub fn count(&self, event: Event) -> usize {
        self.0.borrow().iter().filter(|e| **e == event).count()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

// =============================================================================
// Mock Clock
// =============================================================================

/// Mock TX clock
///
/// Clones share state, so a test can keep one handle while the glue owns
/// another. Only actual state changes are logged.
#[derive(Debug, Clone)]
pub struct MockClock {
    gate: Rc<RefCell<ClockGate>>,
    fail_enable: Rc<Cell<bool>>,
    fail_set_rate: Rc<Cell<bool>>,
    log: EventLog,
}

impl MockClock {
    pub fn new(log: EventLog) -> Self {
        Self {
            gate: Rc::new(RefCell::new(ClockGate::new(0, u32::MAX))),
            fail_enable: Rc::new(Cell::new(false)),
            fail_set_rate: Rc::new(Cell::new(false)),
            log,
        }
    }

    pub fn state(&self) -> ClockState {
        self.gate.borrow().state()
    }

    pub fn rate(&self) -> u32 {
        self.gate.borrow().rate()
    }

    /// Make `enable` report a provider failure
    pub fn fail_enable(&self, fail: bool) {
        self.fail_enable.set(fail);
    }

    /// Make `set_rate` reject every rate
    pub fn fail_set_rate(&self, fail: bool) {
        self.fail_set_rate.set(fail);
    }
}

impl TxClock for MockClock {
    fn prepare(&mut self) -> ClockResult<()> {
        if self.state() == ClockState::Unprepared {
            self.log.push(Event::ClkPrepare);
        }
        self.gate.borrow_mut().prepare()
    }

    fn unprepare(&mut self) {
        if self.state() == ClockState::Prepared {
            self.log.push(Event::ClkUnprepare);
        }
        self.gate.borrow_mut().unprepare();
    }

    fn enable(&mut self) -> ClockResult<()> {
        if self.fail_enable.get() {
            return Err(ClockError::Hardware);
        }
        let before = self.state();
        self.gate.borrow_mut().enable()?;
        if before == ClockState::Prepared {
            self.log.push(Event::ClkEnable);
        }
        Ok(())
    }

    fn disable(&mut self) {
        if self.state() == ClockState::Enabled {
            self.log.push(Event::ClkDisable);
        }
        self.gate.borrow_mut().disable();
    }

    fn set_rate(&mut self, rate_hz: u32) -> ClockResult<()> {
        if self.fail_set_rate.get() {
            return Err(ClockError::RateUnsupported);
        }
        self.gate.borrow_mut().set_rate(rate_hz)?;
        self.log.push(Event::ClkSetRate(rate_hz));
        Ok(())
    }

    fn rate(&self) -> u32 {
        MockClock::rate(self)
    }
}

// =============================================================================
// Mock Register Map
// =============================================================================

/// Mock register map backed by a sparse register table
#[derive(Debug, Clone)]
pub struct MockRegmap {
    registers: Rc<RefCell<HashMap<u32, u32>>>,
    writes: Rc<RefCell<Vec<(u32, u32)>>>,
    max_register: u32,
    fail_write: Rc<Cell<bool>>,
    log: EventLog,
}

impl MockRegmap {
    pub fn new(max_register: u32) -> Self {
        Self::with_log(max_register, EventLog::new())
    }

    pub fn with_log(max_register: u32, log: EventLog) -> Self {
        Self {
            registers: Rc::new(RefCell::new(HashMap::new())),
            writes: Rc::new(RefCell::new(Vec::new())),
            max_register,
            fail_write: Rc::new(Cell::new(false)),
            log,
        }
    }

    /// Set a register without recording a write
    pub fn poke(&self, reg: u32, value: u32) {
        self.registers.borrow_mut().insert(reg, value);
    }

    /// Current register value (0 if never written)
    pub fn peek(&self, reg: u32) -> u32 {
        self.registers.borrow().get(&reg).copied().unwrap_or(0)
    }

    /// All bus writes: (offset, value)
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.writes.borrow().clone()
    }

    /// Make every following write fail with [`RegmapError::Bus`]
    pub fn fail_write(&self, fail: bool) {
        self.fail_write.set(fail);
    }

    fn check(&self, reg: u32) -> RegmapResult<()> {
        if reg % 4 != 0 || reg > self.max_register {
            return Err(RegmapError::InvalidRegister);
        }
        Ok(())
    }
}

impl Regmap for MockRegmap {
    fn read(&mut self, reg: u32) -> RegmapResult<u32> {
        self.check(reg)?;
        Ok(self.peek(reg))
    }

    fn write(&mut self, reg: u32, value: u32) -> RegmapResult<()> {
        self.check(reg)?;
        if self.fail_write.get() {
            return Err(RegmapError::Bus);
        }
        self.poke(reg, value);
        self.writes.borrow_mut().push((reg, value));
        self.log.push(Event::RegWrite(reg, value));
        Ok(())
    }

    fn max_register(&self) -> u32 {
        self.max_register
    }
}

// =============================================================================
// Mock Regulator
// =============================================================================

/// Mock PHY supply counting provider calls
#[derive(Debug, Clone)]
pub struct MockRegulator {
    on: Rc<Cell<bool>>,
    enable_calls: Rc<Cell<usize>>,
    disable_calls: Rc<Cell<usize>>,
    fail_enable: Rc<Cell<bool>>,
    fail_disable: Rc<Cell<bool>>,
    log: EventLog,
}

impl MockRegulator {
    pub fn new() -> Self {
        Self::with_log(EventLog::new())
    }

    pub fn with_log(log: EventLog) -> Self {
        Self {
            on: Rc::new(Cell::new(false)),
            enable_calls: Rc::new(Cell::new(0)),
            disable_calls: Rc::new(Cell::new(0)),
            fail_enable: Rc::new(Cell::new(false)),
            fail_disable: Rc::new(Cell::new(false)),
            log,
        }
    }

    pub fn is_on(&self) -> bool {
        self.on.get()
    }

    pub fn enable_calls(&self) -> usize {
        self.enable_calls.get()
    }

    pub fn disable_calls(&self) -> usize {
        self.disable_calls.get()
    }

    pub fn fail_enable(&self, fail: bool) {
        self.fail_enable.set(fail);
    }

    /// Make `disable` report failure; the rail stays on
    pub fn fail_disable(&self, fail: bool) {
        self.fail_disable.set(fail);
    }
}

impl Default for MockRegulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Regulator for MockRegulator {
    fn enable(&mut self) -> RegulatorResult<()> {
        self.enable_calls.set(self.enable_calls.get() + 1);
        if self.fail_enable.get() {
            return Err(RegulatorError::EnableFailed);
        }
        self.on.set(true);
        self.log.push(Event::RegulatorEnable);
        Ok(())
    }

    fn disable(&mut self) -> RegulatorResult<()> {
        self.disable_calls.set(self.disable_calls.get() + 1);
        if self.fail_disable.get() {
            return Err(RegulatorError::DisableFailed);
        }
        self.on.set(false);
        self.log.push(Event::RegulatorDisable);
        Ok(())
    }
}

// =============================================================================
// Mock GPIO and Delay
// =============================================================================

/// Error reported by [`MockPin`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockPinError;

impl embedded_hal::digital::Error for MockPinError {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}

/// Mock output pin
#[derive(Debug, Clone, Default)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
    fail: Rc<Cell<bool>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    /// Make every pin operation fail
    pub fn fail(&self, fail: bool) {
        self.fail.set(fail);
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = MockPinError;
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_low(&mut self) -> core::result::Result<(), MockPinError> {
        if self.fail.get() {
            return Err(MockPinError);
        }
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> core::result::Result<(), MockPinError> {
        if self.fail.get() {
            return Err(MockPinError);
        }
        self.high.set(true);
        Ok(())
    }
}

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Clone, Default)]
pub struct MockDelay {
    total_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total microseconds that were "delayed"
    pub fn total_us(&self) -> u64 {
        self.total_ns.get() / 1_000
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

// =============================================================================
// Mock Device Tree
// =============================================================================

/// Behaviour of the device behind the `syscon` phandle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysconProvider {
    /// Probed and publishing its regmap
    Ready,
    /// Not probed yet
    NotProbed,
    /// Probed but publishing no regmap
    NoRegmap,
}

/// Outcome of the `"phy"` regulator lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegulatorLookup {
    Absent,
    Present,
    Deferred,
    /// Lookup fails with something other than a deferral
    Broken,
}

/// Node reached through the `syscon` phandle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockSysconNode;

/// Mock GMAC device-tree node with its providers
///
/// All handles it hands out share state with the ones returned by
/// [`clock`](Self::clock), [`regmap`](Self::regmap) and
/// [`regulator`](Self::regulator).
#[derive(Debug)]
pub struct MockDeviceNode {
    /// Name and value; `None` marks a property that is not a string
    properties: Vec<(&'static str, Option<&'static str>)>,
    syscon: Option<SysconProvider>,
    syscon_table: core::result::Result<(), ProbeError>,
    regulator_lookup: RegulatorLookup,
    missing_clocks: Vec<&'static str>,
    requested_clocks: RefCell<Vec<String>>,
    regulator_gets: Cell<usize>,
    log: EventLog,
    clock: MockClock,
    regmap: MockRegmap,
    regulator: MockRegulator,
}

impl MockDeviceNode {
    /// Node without properties, syscon or supply
    pub fn new() -> Self {
        let log = EventLog::new();
        Self {
            properties: Vec::new(),
            syscon: None,
            syscon_table: Err(ProbeError::NoRegmap),
            regulator_lookup: RegulatorLookup::Absent,
            missing_clocks: Vec::new(),
            requested_clocks: RefCell::new(Vec::new()),
            regulator_gets: Cell::new(0),
            clock: MockClock::new(log.clone()),
            regmap: MockRegmap::with_log(0x3FC, log.clone()),
            regulator: MockRegulator::with_log(log.clone()),
            log,
        }
    }

    pub fn with_property(mut self, name: &'static str, value: &'static str) -> Self {
        self.properties.push((name, Some(value)));
        self
    }

    pub fn with_malformed_property(mut self, name: &'static str) -> Self {
        self.properties.push((name, None));
        self
    }

    pub fn with_syscon(mut self, provider: SysconProvider) -> Self {
        self.syscon = Some(provider);
        self
    }

    /// Outcome of the phandle-table syscon lookup
    pub fn with_syscon_table(mut self, result: core::result::Result<(), ProbeError>) -> Self {
        self.syscon_table = result;
        self
    }

    pub fn with_regulator(mut self, lookup: RegulatorLookup) -> Self {
        self.regulator_lookup = lookup;
        self
    }

    pub fn without_clock(mut self, id: &'static str) -> Self {
        self.missing_clocks.push(id);
        self
    }

    pub fn log(&self) -> EventLog {
        self.log.clone()
    }

    pub fn clock(&self) -> &MockClock {
        &self.clock
    }

    pub fn regmap(&self) -> &MockRegmap {
        &self.regmap
    }

    pub fn regulator(&self) -> &MockRegulator {
        &self.regulator
    }

    /// Names passed to `clk_get`, in order
    pub fn requested_clocks(&self) -> Vec<String> {
        self.requested_clocks.borrow().clone()
    }

    pub fn clock_gets(&self) -> usize {
        self.requested_clocks.borrow().len()
    }

    pub fn regulator_gets(&self) -> usize {
        self.regulator_gets.get()
    }
}

impl Default for MockDeviceNode {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceNode for MockDeviceNode {
    type Clock = MockClock;
    type Regulator = MockRegulator;
    type Regmap = MockRegmap;
    type Node = MockSysconNode;

    fn property_str(&self, name: &str) -> ProbeResult<Option<&str>> {
        match self.properties.iter().find(|(n, _)| *n == name) {
            Some((_, Some(value))) => Ok(Some(*value)),
            Some((_, None)) => Err(ProbeError::InvalidProperty),
            None => Ok(None),
        }
    }

    fn parse_phandle(&self, name: &str, index: usize) -> Option<MockSysconNode> {
        match (name, index, self.syscon) {
            ("syscon", 0, Some(_)) => Some(MockSysconNode),
            _ => None,
        }
    }

    fn device_regmap(&self, _node: &MockSysconNode) -> ProbeResult<MockRegmap> {
        match self.syscon {
            Some(SysconProvider::Ready) => Ok(self.regmap.clone()),
            Some(SysconProvider::NotProbed) => Err(ProbeError::Deferred),
            Some(SysconProvider::NoRegmap) | None => Err(ProbeError::NoRegmap),
        }
    }

    fn syscon_regmap_by_phandle(&self, _name: &str) -> ProbeResult<MockRegmap> {
        self.syscon_table.map(|()| self.regmap.clone())
    }

    fn clk_get(&self, id: &str) -> ProbeResult<MockClock> {
        self.requested_clocks.borrow_mut().push(id.to_string());
        if self.missing_clocks.iter().any(|missing| *missing == id) {
            return Err(ProbeError::NotFound);
        }
        Ok(self.clock.clone())
    }

    fn regulator_get_optional(&self, _id: &str) -> ProbeResult<Option<MockRegulator>> {
        self.regulator_gets.set(self.regulator_gets.get() + 1);
        match self.regulator_lookup {
            RegulatorLookup::Absent => Ok(None),
            RegulatorLookup::Present => Ok(Some(self.regulator.clone())),
            RegulatorLookup::Deferred => Err(ProbeError::Deferred),
            RegulatorLookup::Broken => Err(ProbeError::NotFound),
        }
    }
}

// =============================================================================
// Mock MAC Core
// =============================================================================

/// Mock DWMAC core recording its entry points into an [`EventLog`]
#[derive(Debug)]
pub struct MockMacCore {
    log: EventLog,
    fail_at: Cell<Option<CoreStep>>,
    probed_with: Cell<Option<PlatformData>>,
    last_speed: Cell<Option<Speed>>,
}

impl MockMacCore {
    pub fn new(log: EventLog) -> Self {
        Self {
            log,
            fail_at: Cell::new(None),
            probed_with: Cell::new(None),
            last_speed: Cell::new(None),
        }
    }

    /// Make the given fallible entry point fail with `NotFound`
    pub fn fail_at(&self, step: CoreStep) {
        self.fail_at.set(Some(step));
    }

    /// Let every entry point succeed again
    pub fn clear_failure(&self) {
        self.fail_at.set(None);
    }

    /// Platform data passed to `driver_probe`
    pub fn probed_with(&self) -> Option<PlatformData> {
        self.probed_with.get()
    }

    pub fn last_speed(&self) -> Option<Speed> {
        self.last_speed.get()
    }

    fn step(&self, step: CoreStep) -> Result<()> {
        self.log.push(Event::Core(step));
        if self.fail_at.get() == Some(step) {
            return Err(ProbeError::NotFound.into());
        }
        Ok(())
    }
}

impl MacCore for MockMacCore {
    fn get_platform_resources(&mut self) -> Result<()> {
        self.step(CoreStep::GetResources)
    }

    fn probe_config_dt(&mut self) -> Result<()> {
        self.step(CoreStep::ConfigDt)
    }

    fn remove_config_dt(&mut self) {
        self.log.push(Event::Core(CoreStep::RemoveConfigDt));
    }

    fn driver_probe(
        &mut self,
        plat: &PlatformData,
        _glue: &mut dyn PlatformCallbacks,
    ) -> Result<()> {
        self.step(CoreStep::Probe)?;
        self.probed_with.set(Some(*plat));
        Ok(())
    }

    fn driver_remove(&mut self, _glue: &mut dyn PlatformCallbacks) {
        self.log.push(Event::Core(CoreStep::Remove));
    }

    fn suspend(&mut self, _glue: &mut dyn PlatformCallbacks) {
        self.log.push(Event::Core(CoreStep::Suspend));
    }

    fn resume(&mut self, _glue: &mut dyn PlatformCallbacks) -> Result<()> {
        self.step(CoreStep::Resume)
    }

    fn link_up(&mut self, speed: Speed) {
        self.last_speed.set(Some(speed));
        self.log.push(Event::Core(CoreStep::LinkUp(speed.mbps())));
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::vec;

    use super::*;

    #[test]
    fn mock_clock_logs_only_transitions() {
        let log = EventLog::new();
        let mut clk = MockClock::new(log.clone());

        clk.disable();
        clk.unprepare();
        assert!(log.events().is_empty());

        clk.prepare_enable().unwrap();
        clk.prepare_enable().unwrap();
        clk.set_rate(25_000_000).unwrap();
        assert_eq!(
            log.events(),
            vec![Event::ClkPrepare, Event::ClkEnable, Event::ClkSetRate(25_000_000)]
        );
        assert_eq!(clk.rate(), 25_000_000);
    }

    #[test]
    fn mock_regmap_read_write() {
        let mut regmap = MockRegmap::new(0x3FC);

        assert_eq!(regmap.read(0x164).unwrap(), 0);
        regmap.write(0x164, 0x1006).unwrap();
        assert_eq!(regmap.read(0x164).unwrap(), 0x1006);
        assert_eq!(regmap.writes(), vec![(0x164, 0x1006)]);
        assert_eq!(regmap.read(0x400), Err(RegmapError::InvalidRegister));
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();
        embedded_hal::delay::DelayNs::delay_us(&mut delay, 150);
        embedded_hal::delay::DelayNs::delay_ms(&mut delay, 2);
        assert_eq!(delay.total_us(), 2_150);
    }

    #[test]
    fn mock_node_shares_handles() {
        let node = MockDeviceNode::new().with_regulator(RegulatorLookup::Present);
        let mut reg = node.regulator_get_optional("phy").unwrap().unwrap();
        reg.enable().unwrap();
        assert!(node.regulator().is_on());
        assert_eq!(node.log().events(), vec![Event::RegulatorEnable]);
    }
}
