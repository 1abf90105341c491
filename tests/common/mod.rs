//! Mocks compartidos por los tests de integración
#![allow(dead_code)]

use std::sync::{Arc, Condvar, Mutex};

use bmm150_rs::hal::{HalContext, Scheduler, TimerProcess};
use bmm150_rs::interface::Interface;
use bmm150_rs::{
    Bmm150, Bmm150Config, Bmm150Error, CompassDevType, CompassFrontend, CompassInstance, Device,
    ManualTimeSource, MagField,
};
use embedded_hal::delay::DelayNs;

/// Bloque de trim de referencia (0x5D..=0x71)
pub const TRIM_RAW: [u8; 21] = [
    0x02, 0xFF, 0xAA, 0xBB, 0xCC, 0xF4, 0xFF, 0x1A, 0x18, 0xDD, 0xEE, 0xFB, 0x02, 0xAB, 0x60,
    0xD7, 0x19, 0xCA, 0xFF, 0xFD, 0x1D,
];

pub const START_US: u64 = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct MockError;

/// Mapa de registros simulado con inyección de fallos
pub struct MockBus {
    pub registers: [u8; 256],
    pub writes: Vec<(u8, u8)>,
    pub reads: Vec<(u8, usize)>,
    pub fail_read_at: Option<u8>,
    pub fail_write_at: Option<u8>,
}

impl MockBus {
    pub fn bmm150() -> Self {
        let mut registers = [0u8; 256];
        registers[0x40] = 0x32;
        registers[0x5D..0x5D + TRIM_RAW.len()].copy_from_slice(&TRIM_RAW);
        Self {
            registers,
            writes: Vec::new(),
            reads: Vec::new(),
            fail_read_at: None,
            fail_write_at: None,
        }
    }

    /// Carga un dato en los registros 0x42..=0x49
    pub fn set_sample(&mut self, x: i16, y: i16, z: i16, hall: u16, ready: bool) {
        let x = (x << 3).to_le_bytes();
        let y = (y << 3).to_le_bytes();
        let z = (z << 1).to_le_bytes();
        let rhall = ((hall << 2) | u16::from(ready)).to_le_bytes();
        self.registers[0x42..0x4A]
            .copy_from_slice(&[x[0], x[1], y[0], y[1], z[0], z[1], rhall[0], rhall[1]]);
    }

    pub fn data_reads(&self) -> usize {
        self.reads.iter().filter(|(reg, _)| *reg == 0x42).count()
    }
}

impl Interface for MockBus {
    type Error = MockError;

    fn write_reg(&mut self, reg: u8, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_write_at == Some(reg) {
            return Err(MockError);
        }
        for (i, value) in data.iter().enumerate() {
            let addr = reg as usize + i;
            self.registers[addr] = *value;
            self.writes.push((addr as u8, *value));
        }
        Ok(())
    }

    fn read_reg(&mut self, reg: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        self.reads.push((reg, data.len()));
        if self.fail_read_at == Some(reg) {
            return Err(MockError);
        }
        let start = reg as usize;
        data.copy_from_slice(&self.registers[start..start + data.len()]);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FrontendEvent {
    Registered(CompassInstance),
    DevType(CompassInstance, CompassDevType),
    Raw(MagField, u64, CompassInstance),
    Filtered(MagField, CompassInstance),
}

/// Frontend que registra todas las llamadas. La rotación es la identidad y la
/// corrección resta `offset`.
pub struct RecordingFrontend {
    pub events: Mutex<Vec<FrontendEvent>>,
    pub offset: MagField,
    next_instance: Mutex<u8>,
}

impl RecordingFrontend {
    pub fn new(offset: MagField) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            offset,
            next_instance: Mutex::new(0),
        }
    }

    pub fn events(&self) -> Vec<FrontendEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn raw_samples(&self) -> Vec<(MagField, u64)> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FrontendEvent::Raw(field, ts, _) => Some((field, ts)),
                _ => None,
            })
            .collect()
    }

    pub fn filtered_samples(&self) -> Vec<MagField> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                FrontendEvent::Filtered(field, _) => Some(field),
                _ => None,
            })
            .collect()
    }

    pub fn registrations(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, FrontendEvent::Registered(_)))
            .count()
    }
}

impl CompassFrontend for RecordingFrontend {
    fn register_instance(&self) -> CompassInstance {
        let mut next = self.next_instance.lock().unwrap();
        let instance = CompassInstance(*next);
        *next += 1;
        self.events.lock().unwrap().push(FrontendEvent::Registered(instance));
        instance
    }

    fn set_device_type(&self, instance: CompassInstance, dev_type: CompassDevType) {
        self.events
            .lock()
            .unwrap()
            .push(FrontendEvent::DevType(instance, dev_type));
    }

    fn apply_rotation(&self, _field: &mut MagField, _instance: CompassInstance) {}

    fn publish_raw_sample(&self, field: &MagField, timestamp_us: u64, instance: CompassInstance) {
        self.events
            .lock()
            .unwrap()
            .push(FrontendEvent::Raw(*field, timestamp_us, instance));
    }

    fn apply_correction(&self, field: &mut MagField, _instance: CompassInstance) {
        field.x -= self.offset.x;
        field.y -= self.offset.y;
        field.z -= self.offset.z;
    }

    fn publish_filtered_sample(&self, field: &MagField, instance: CompassInstance) {
        self.events
            .lock()
            .unwrap()
            .push(FrontendEvent::Filtered(*field, instance));
    }
}

#[derive(Default)]
struct GateState {
    suspended: u32,
    running: bool,
    suspend_calls: u32,
    resume_calls: u32,
}

/// Planificador simulado: `tick` ejecuta los procesos registrados salvo que
/// estén suspendidos, en cuyo caso espera a que se reanuden.
#[derive(Default)]
pub struct GatedScheduler {
    state: Mutex<GateState>,
    cond: Condvar,
    processes: Mutex<Vec<Arc<dyn TimerProcess>>>,
}

impl GatedScheduler {
    pub fn tick(&self) {
        {
            let mut state = self.state.lock().unwrap();
            while state.suspended > 0 {
                state = self.cond.wait(state).unwrap();
            }
            state.running = true;
        }

        let processes = self.processes.lock().unwrap().clone();
        for process in processes {
            process.timer_tick();
        }

        self.state.lock().unwrap().running = false;
        self.cond.notify_all();
    }

    pub fn suspend_calls(&self) -> u32 {
        self.state.lock().unwrap().suspend_calls
    }

    pub fn resume_calls(&self) -> u32 {
        self.state.lock().unwrap().resume_calls
    }

    pub fn is_suspended(&self) -> bool {
        self.state.lock().unwrap().suspended > 0
    }

    pub fn process_count(&self) -> usize {
        self.processes.lock().unwrap().len()
    }
}

impl Scheduler for GatedScheduler {
    fn suspend_timer_procs(&self) {
        let mut state = self.state.lock().unwrap();
        while state.running {
            state = self.cond.wait(state).unwrap();
        }
        state.suspended += 1;
        state.suspend_calls += 1;
    }

    fn resume_timer_procs(&self) {
        let mut state = self.state.lock().unwrap();
        state.suspended -= 1;
        state.resume_calls += 1;
        drop(state);
        self.cond.notify_all();
    }

    fn register_timer_process(&self, process: Arc<dyn TimerProcess>) {
        self.processes.lock().unwrap().push(process);
    }
}

/// Retardo que solo acumula el tiempo pedido
#[derive(Default)]
pub struct RecordingDelay {
    pub total_ns: u64,
}

impl DelayNs for RecordingDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

pub type TestDriver = Bmm150<MockBus, GatedScheduler, ManualTimeSource, RecordingFrontend>;

pub struct Harness {
    pub dev: Device<MockBus>,
    pub scheduler: Arc<GatedScheduler>,
    pub clock: Arc<ManualTimeSource>,
    pub frontend: Arc<RecordingFrontend>,
    pub delay: RecordingDelay,
}

impl Harness {
    pub fn new(bus: MockBus) -> Self {
        Self::with_offset(bus, MagField::ZERO)
    }

    pub fn with_offset(bus: MockBus, offset: MagField) -> Self {
        Self {
            dev: Device::new(bus),
            scheduler: Arc::new(GatedScheduler::default()),
            clock: Arc::new(ManualTimeSource::new(START_US)),
            frontend: Arc::new(RecordingFrontend::new(offset)),
            delay: RecordingDelay::default(),
        }
    }

    pub fn probe(&mut self, config: Bmm150Config) -> Result<Arc<TestDriver>, Bmm150Error> {
        let ctx = HalContext::new(Arc::clone(&self.scheduler), Arc::clone(&self.clock));
        Bmm150::probe(
            Arc::clone(&self.frontend),
            self.dev.clone(),
            ctx,
            &mut self.delay,
            config,
        )
    }

    pub fn set_sample(&self, x: i16, y: i16, z: i16, hall: u16, ready: bool) {
        self.dev.lock().set_sample(x, y, z, hall, ready);
    }
}

/// Campo esperado para X = 1000, Y = -1000, Z = 2000, hall = 6615 (mGauss)
pub const REFERENCE_FIELD: MagField = MagField::new(3642.5, -3598.75, 7155.0);

pub fn set_reference_sample(harness: &Harness) {
    harness.set_sample(1000, -1000, 2000, 6615, true);
}

pub fn assert_field_eq(actual: MagField, expected: MagField) {
    let diff = actual + expected * -1.0;
    let tolerance = 1e-5 * expected.length().max(100.0);
    assert!(
        diff.length() < tolerance,
        "expected {:?}, got {:?}",
        expected,
        actual
    );
}
