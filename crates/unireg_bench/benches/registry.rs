//! Registry operation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use unireg_core::{Course, Faculty, Student, University};

const DEPARTMENTS: [&str; 4] = ["CSE", "EEE", "MAT", "PHY"];

/// Build a registry with random enrollments and grades.
fn random_university(students: usize, courses: usize) -> University {
    let mut rng = rand::thread_rng();
    let mut uni = University::default();

    for i in 0..courses {
        let id = format!("C{:03}", i + 1);
        let _ = uni.add_course(Course::new(&id, format!("Course {i}"), 3).unwrap());
    }
    for i in 0..courses / 2 + 1 {
        let id = format!("F{:04}", i + 1);
        let _ = uni.add_faculty(
            Faculty::new(&id, format!("Faculty {i}"), DEPARTMENTS[i % 4]).unwrap(),
        );
    }
    for i in 0..students {
        let id = format!("S{:04}", i + 1);
        let dept = DEPARTMENTS[i % 4];
        let _ = uni.add_student(
            Student::new(&id, format!("Student {i}"), 20, "Other", dept).unwrap(),
        );
        for _ in 0..4 {
            let course = format!("C{:03}", rng.gen_range(0..courses) + 1);
            let _ = uni.enroll_student_in_course(&id, &course);
            let _ = uni.assign_grade(&id, &course, rng.gen_range(0.0..=4.0));
        }
    }
    uni
}

/// Benchmark ID lookups.
fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_student");

    for count in [100, 1000, 9000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            let uni = random_university(count, 50);
            let mut rng = rand::thread_rng();
            let ids: Vec<String> = (0..256)
                .map(|_| format!("S{:04}", rng.gen_range(0..count) + 1))
                .collect();

            let mut i = 0;
            b.iter(|| {
                let found = uni.find_student(black_box(&ids[i % ids.len()]));
                i += 1;
                black_box(found);
            });
        });
    }
    group.finish();
}

/// Benchmark enrolling students, including the grade map update.
fn bench_enroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("enroll");

    for count in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter_batched(
                || random_university(count, 20),
                |mut uni| {
                    for i in 0..count {
                        let _ = uni.enroll_student_in_course(&format!("S{:04}", i + 1), "C001");
                    }
                    black_box(uni);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Benchmark course removal, which purges every grade map and roster.
fn bench_remove_course(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_course");

    for count in [100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, &count| {
            b.iter_batched(
                || random_university(count, 20),
                |mut uni| {
                    let _ = uni.remove_course(black_box("C001"));
                    black_box(uni);
                },
                criterion::BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

/// Benchmark GPA ranking and averaging.
fn bench_gpa(c: &mut Criterion) {
    let mut group = c.benchmark_group("gpa");

    for count in [100, 1000, 9000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        let uni = random_university(*count, 50);

        group.bench_with_input(BenchmarkId::new("sort", count), &uni, |b, uni| {
            b.iter(|| black_box(uni.sort_students_by_gpa(black_box(true))));
        });
        group.bench_with_input(BenchmarkId::new("average", count), &uni, |b, uni| {
            b.iter(|| black_box(uni.average_gpa()));
        });
    }
    group.finish();
}

/// Benchmark name search.
fn bench_search(c: &mut Criterion) {
    let uni = random_university(1000, 50);

    c.bench_function("search_students_by_name", |b| {
        b.iter(|| black_box(uni.search_students_by_name(black_box("student 12"))));
    });
}

/// Benchmark integrity checking.
fn bench_integrity(c: &mut Criterion) {
    let mut group = c.benchmark_group("check_integrity");

    for count in [100, 1000].iter() {
        let uni = random_university(*count, 50);
        group.bench_with_input(BenchmarkId::from_parameter(count), &uni, |b, uni| {
            b.iter(|| black_box(uni.check_integrity()));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_find,
    bench_enroll,
    bench_remove_course,
    bench_gpa,
    bench_search,
    bench_integrity,
);

criterion_main!(benches);
