use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lectura::{Language, LanguageProcessor};
use std::time::Duration;

const ENGLISH_PASSAGE: &str = "The cat sat on the mat. The dog ran to the park. \
They like to play with my friend. Tomorrow we will visit the library together!";

const SPANISH_PASSAGE: &str = "Los niños juegan en el parque con sus amigos. \
¿Dónde está la maestra? ¡Está en la escuela con los libros! La mariposa vuela sobre las flores.";

const PUERTO_RICAN_PASSAGE: &str = "Mi mamá y yo fuimos al mall en la guagua, ¿verdad? \
Estaba shopping con mi prima y después vamos a janguear en la playa.";

/// Building a processor compiles every lexicon table
fn bench_processor_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("processor_construction");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    group.bench_function("new", |b| {
        b.iter(|| {
            let processor = LanguageProcessor::new().unwrap();
            black_box(processor);
        })
    });

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let processor = LanguageProcessor::new().unwrap();
    let mut group = c.benchmark_group("full_pipeline");

    for (name, text) in [
        ("english", ENGLISH_PASSAGE),
        ("spanish", SPANISH_PASSAGE),
        ("puerto_rican", PUERTO_RICAN_PASSAGE),
    ] {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("process", name), text, |b, text| {
            b.iter(|| black_box(processor.process(black_box(text))))
        });
    }

    // Scaling with passage length
    for repeats in [1usize, 10, 50] {
        let text = SPANISH_PASSAGE.repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("process_repeated", repeats), &text, |b, text| {
            b.iter(|| black_box(processor.process(black_box(text))))
        });
    }

    group.finish();
}

fn bench_stages(c: &mut Criterion) {
    let processor = LanguageProcessor::new().unwrap();
    let mut group = c.benchmark_group("stages");

    group.bench_function("detect", |b| {
        b.iter(|| black_box(processor.detector().detect(black_box(PUERTO_RICAN_PASSAGE))))
    });

    group.bench_function("text_process", |b| {
        b.iter(|| black_box(processor.text_processor().process(black_box(SPANISH_PASSAGE))))
    });

    let processed = processor.text_processor().process(SPANISH_PASSAGE);
    group.bench_function("readability", |b| {
        b.iter(|| black_box(processor.readability().analyze(&processed, Language::Spanish)))
    });
    group.bench_function("validate", |b| {
        b.iter(|| black_box(processor.validator().validate(&processed, Language::Spanish)))
    });

    let words = [
        ("mariposa", Language::Spanish),
        ("canción", Language::Spanish),
        ("instante", Language::Spanish),
        ("beautiful", Language::English),
        ("children", Language::English),
    ];
    group.bench_function("syllabify_words", |b| {
        b.iter(|| {
            for (word, language) in words {
                black_box(processor.phonetics().extract_syllables(black_box(word), language));
            }
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_processor_construction,
    bench_full_pipeline,
    bench_stages
);
criterion_main!(benches);
