use aegis_audio::{EMBEDDING_DIM, FRAME_SAMPLES};
use aegis_distress::{AmbientDistressScorer, DistressHistory, EmergencyTypeResolver, SustainedDistressAnalyzer};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn make_burst_pcm(n_samples: usize) -> Vec<i16> {
    (0..n_samples)
        .map(|i| {
            let t = i as f64 / 16000.0;
            let amp = if (i / 160) % 2 == 0 { 24000.0 } else { 2000.0 };
            (amp * (1000.0 * 2.0 * std::f64::consts::PI * t).sin()) as i16
        })
        .collect()
}

fn bench_analyze_moderate(c: &mut Criterion) {
    let analyzer = SustainedDistressAnalyzer::new();
    let frame = make_burst_pcm(FRAME_SAMPLES);
    let mut history = DistressHistory::new();
    for p in [0.4, 0.45, 0.4, 0.45] {
        analyzer.analyze(&frame, p, 0.3, &mut history);
    }

    // The moderate band runs all three corroboration checks.
    c.bench_function("distress_analyze_moderate_975ms", |bch| {
        bch.iter(|| {
            let _ = black_box(analyzer.analyze(black_box(&frame), 0.45, 0.3, &mut history));
        });
    });
}

fn bench_ambient_score(c: &mut Criterion) {
    let scorer = AmbientDistressScorer::new();
    let embedding: Vec<f32> = (0..EMBEDDING_DIM).map(|i| ((i as f32) * 0.19).sin().abs()).collect();

    c.bench_function("distress_ambient_score_521d", |bch| {
        bch.iter(|| {
            let _ = black_box(scorer.score(black_box(&embedding), 0.2));
        });
    });
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = EmergencyTypeResolver::default();
    let mut embedding = vec![0.0f32; EMBEDDING_DIM];
    embedding[19] = 0.7;
    embedding[11] = 0.4;

    c.bench_function("distress_resolve_scream_context", |bch| {
        bch.iter(|| {
            let _ = black_box(resolver.resolve(None, 0.7, black_box(&embedding), 0.05));
        });
    });
}

criterion_group!(benches, bench_analyze_moderate, bench_ambient_score, bench_resolve);
criterion_main!(benches);
