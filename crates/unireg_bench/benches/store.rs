//! Save and load benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::TempDir;
use unireg_core::{Config, Course, DataStore, Student, University};

/// Build a registry where every student takes three courses.
fn university(students: usize) -> University {
    let mut uni = University::default();
    for i in 0..30 {
        let _ = uni.add_course(Course::new(&format!("C{:03}", i + 1), "Course", 3).unwrap());
    }
    for i in 0..students {
        let id = format!("S{:04}", i + 1);
        let _ = uni.add_student(Student::new(&id, "Student", 20, "Other", "CSE").unwrap());
        for k in 0..3 {
            let course = format!("C{:03}", (i + k) % 30 + 1);
            let _ = uni.enroll_student_in_course(&id, &course);
            let _ = uni.assign_grade(&id, &course, 3.0);
        }
    }
    uni
}

/// Benchmark saving the unified document.
fn bench_save(c: &mut Criterion) {
    let mut group = c.benchmark_group("save");

    for count in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        for pretty in [true, false] {
            let dir = TempDir::new().unwrap();
            let store = DataStore::new(Config::new().data_dir(dir.path()).pretty(pretty));
            let uni = university(*count);
            let label = if pretty { "pretty" } else { "compact" };

            group.bench_with_input(BenchmarkId::new(label, count), &uni, |b, uni| {
                b.iter(|| store.save(black_box(uni)).unwrap());
            });
        }
    }
    group.finish();
}

/// Benchmark loading, including ID validation and GPA recomputation.
fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");

    for count in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let dir = TempDir::new().unwrap();
            let store = DataStore::new(Config::new().data_dir(dir.path()));
            store.save(&university(count)).unwrap();

            let mut uni = University::default();
            b.iter(|| {
                let report = store.load(&mut uni).unwrap();
                black_box(report);
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_save, bench_load);

criterion_main!(benches);
