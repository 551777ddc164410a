// Copyright (C) 2020  Pierre Krieger
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::ffi::c_void;
use wgpu_ffm_core::{foreign_callback, foreign_struct, Arena, ForeignStruct as _};

foreign_struct! {
    pub struct Entry {
        pub next: *const c_void,
        pub binding: u32,
        pub buffer: *mut c_void,
        pub offset: u64,
        pub size: u64,
        pub sampler: *mut c_void,
        pub view: *mut c_void,
    }
}

foreign_callback! {
    pub callback Add = AddDesc(a: u64, b: u64) -> u64;
}

fn bench(c: &mut Criterion) {
    c.bench_function("fill-256-entries", |b| {
        let arena = Arena::new();
        let entries = Entry::allocate_array(256, &arena);
        b.iter(|| {
            for n in 0..256 {
                let entry = Entry::as_slice(&entries, n);
                Entry::binding.set(&entry, black_box(n as u32));
                Entry::offset.set(&entry, black_box(n as u64 * 256));
                Entry::size.set(&entry, black_box(256));
            }
        })
    });

    c.bench_function("read-256-entries", |b| {
        let arena = Arena::new();
        let entries = Entry::allocate_array(256, &arena);
        b.iter(|| {
            let mut total = 0u64;
            for n in 0..256 {
                total += Entry::size.get(&Entry::as_slice(&entries, n));
            }
            black_box(total)
        })
    });

    c.bench_function("upcall-round-trip", |b| {
        let arena = Arena::new();
        let upcall = AddDesc::upcall(&arena, |a, b| a.wrapping_add(b));
        let call = unsafe { AddDesc::downcall(upcall.address()) };
        b.iter(|| call(black_box(1), black_box(2), upcall.userdata()))
    });
}

criterion_group!(benches, bench);
criterion_main!(benches);
