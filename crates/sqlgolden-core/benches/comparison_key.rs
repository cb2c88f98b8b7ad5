use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use sqlgolden_core::{canonicalize, comparison_key};

fn join_query(joins: usize) -> String {
    let mut sql = String::from("SELECT * FROM `t0`");
    for i in (1..=joins).rev() {
        sql.push_str(&format!(" LEFT JOIN `t{i}` ON `t0`.`id`=`t{i}`.`t0_id`"));
    }
    sql.push_str(" WHERE ");
    let conditions: Vec<String> = (0..joins.max(1))
        .rev()
        .map(|i| format!("(`t0`.`c{i}`={i})"))
        .collect();
    sql.push_str(&conditions.join(" AND "));
    sql.push_str(" LIMIT 0,20");
    sql
}

fn bench_comparison_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison_key");
    for joins in [1_usize, 4, 16] {
        let sql = join_query(joins);
        group.throughput(Throughput::Bytes(sql.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(joins), &sql, |b, sql| {
            b.iter(|| criterion::black_box(comparison_key(sql)));
        });
    }
    group.finish();
}

fn bench_canonicalize(c: &mut Criterion) {
    let sql = "select u.name, p.title from users u join posts p on u.id = p.user_id \
               where u.age > 30 and p.published = true order by p.created_at desc limit 10";
    c.bench_function("canonicalize/join_select", |b| {
        b.iter(|| criterion::black_box(canonicalize(sql)));
    });
}

criterion_group!(benches, bench_comparison_key, bench_canonicalize);
criterion_main!(benches);
