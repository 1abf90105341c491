use bmm150_rs::hal::{HalContext, Scheduler, TimerProcess};
use bmm150_rs::interface::I2C_ADDRESS_DEFAULT;
use bmm150_rs::{
    self, Bmm150, Bmm150Config, CompassDevType, CompassFrontend, CompassInstance, MagField,
    SystemTimeSource,
};
use linux_embedded_hal::{Delay, I2cdev};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

/// Planificador con un hilo que ejecuta los procesos cada milisegundo
#[derive(Default)]
struct ThreadScheduler {
    gate: Mutex<(u32, bool)>, // (suspendidos, ejecutando)
    cond: Condvar,
    processes: Mutex<Vec<Arc<dyn TimerProcess>>>,
}

impl ThreadScheduler {
    fn run(self: Arc<Self>, running: Arc<AtomicBool>) -> thread::JoinHandle<()> {
        thread::spawn(move || {
            while running.load(Ordering::SeqCst) {
                {
                    let mut gate = self.gate.lock().unwrap();
                    while gate.0 > 0 {
                        gate = self.cond.wait(gate).unwrap();
                    }
                    gate.1 = true;
                }
                let processes = self.processes.lock().unwrap().clone();
                for process in processes {
                    process.timer_tick();
                }
                self.gate.lock().unwrap().1 = false;
                self.cond.notify_all();
                thread::sleep(Duration::from_millis(1));
            }
        })
    }
}

impl Scheduler for ThreadScheduler {
    fn suspend_timer_procs(&self) {
        let mut gate = self.gate.lock().unwrap();
        while gate.1 {
            gate = self.cond.wait(gate).unwrap();
        }
        gate.0 += 1;
    }

    fn resume_timer_procs(&self) {
        self.gate.lock().unwrap().0 -= 1;
        self.cond.notify_all();
    }

    fn register_timer_process(&self, process: Arc<dyn TimerProcess>) {
        self.processes.lock().unwrap().push(process);
    }
}

/// Frontend mínimo: sin rotación ni corrección, imprime las medias
struct PrintingFrontend;

impl CompassFrontend for PrintingFrontend {
    fn register_instance(&self) -> CompassInstance {
        CompassInstance(0)
    }

    fn set_device_type(&self, instance: CompassInstance, dev_type: CompassDevType) {
        println!("Instancia {:?}: {:?}", instance, dev_type);
    }

    fn apply_rotation(&self, _field: &mut MagField, _instance: CompassInstance) {}

    fn publish_raw_sample(&self, _field: &MagField, _timestamp_us: u64, _instance: CompassInstance) {}

    fn apply_correction(&self, _field: &mut MagField, _instance: CompassInstance) {}

    fn publish_filtered_sample(&self, field: &MagField, _instance: CompassInstance) {
        println!(
            "Campo: x={:.1}mG, y={:.1}mG, z={:.1}mG, |B|={:.1}mG",
            field.x,
            field.y,
            field.z,
            field.length()
        );
    }
}

fn main() {
    println!("BMM150 - Ejemplo básico");

    let bus_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/dev/i2c-1".to_string());

    // Flag para controlar la ejecución del programa
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    // Configurar el manejador para Ctrl+C
    ctrlc::set_handler(move || {
        println!("\nDeteniendo el programa...");
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error al configurar el manejador de Ctrl+C");

    // Crear instancia de I2C para Linux
    let i2c = match I2cdev::new(&bus_path) {
        Ok(i2c) => i2c,
        Err(e) => {
            eprintln!("Error al abrir dispositivo I2C {}: {:?}", bus_path, e);
            return;
        }
    };
    let mut delay = Delay {};

    let device = bmm150_rs::new_i2c_device(i2c, I2C_ADDRESS_DEFAULT);
    let scheduler = Arc::new(ThreadScheduler::default());
    let ctx = HalContext::new(Arc::clone(&scheduler), Arc::new(SystemTimeSource::new()));

    let compass = match Bmm150::probe(
        Arc::new(PrintingFrontend),
        device,
        ctx,
        &mut delay,
        Bmm150Config::default(),
    ) {
        Ok(compass) => compass,
        Err(e) => {
            eprintln!("Error al inicializar el BMM150: {}", e);
            return;
        }
    };
    println!("Dispositivo inicializado correctamente");

    let worker = Arc::clone(&scheduler).run(Arc::clone(&running));

    println!("Leyendo datos. Presiona Ctrl+C para detener...");
    while running.load(Ordering::SeqCst) {
        compass.read();
        thread::sleep(Duration::from_millis(200));
    }

    worker.join().ok();
    println!("Ejemplo finalizado");
}
