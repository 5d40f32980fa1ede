use std::hint::black_box;

use criterion::Criterion;
use rand::Rng;

use libacq::error::Error;
use libacq::shell::{
    CommandDefinition, CommandLineProcessor, CommandRegistry, Handler, OutputBuffer,
};

struct EchoHandler;

impl Handler for EchoHandler {
    fn invoke(&self, arguments: &[&str], out: &mut OutputBuffer<'_>) -> Result<(), Error> {
        for argument in arguments {
            out.append_str(argument)?;
            out.append_str("\r\n")?;
        }
        Ok(())
    }
}

static ECHO: EchoHandler = EchoHandler;

fn echo_processor() -> CommandLineProcessor<'static> {
    let mut registry = CommandRegistry::new();
    registry
        .register(CommandDefinition {
            name: "echo",
            max_args: 8,
            handler: &ECHO,
            help: "echo: prints its arguments\r\n",
        })
        .unwrap();
    CommandLineProcessor::new(registry)
}

pub fn bench_dispatch(c: &mut Criterion) {
    let processor = echo_processor();
    let mut rng = rand::thread_rng();
    let lines: Vec<String> = (0..64)
        .map(|_| format!("echo {:08x} {:08x}", rng.r#gen::<u32>(), rng.r#gen::<u32>()))
        .collect();
    let mut index = 0usize;

    c.bench_function("shell/dispatch", |b| {
        b.iter(|| {
            let line = &lines[index % lines.len()];
            index += 1;
            let mut response = [0u8; 128];
            let mut out = OutputBuffer::new(&mut response);
            let _ = processor.dispatch(black_box(line.as_str()), &mut out);
            black_box(out.len())
        })
    });
}

pub fn bench_output_buffer(c: &mut Criterion) {
    c.bench_function("shell/output_buffer_append", |b| {
        b.iter(|| {
            let mut storage = [0u8; 256];
            let mut out = OutputBuffer::new(&mut storage);
            while out.append_str(black_box("entry/\r\n")).is_ok() {}
            black_box(out.len())
        })
    });
}

pub fn bench_tokenize_flood(c: &mut Criterion) {
    let processor = echo_processor();
    let line = "echo a0 a1 a2 a3 a4 a5 a6 a7";

    c.bench_function("shell/tokenize_flood", |b| {
        b.iter(|| {
            let mut response = [0u8; 256];
            let mut out = OutputBuffer::new(&mut response);
            let _ = processor.dispatch(black_box(line), &mut out);
            black_box(out.len())
        })
    });
}
