#![allow(non_snake_case)]

use symfact::algebra::*;
use symfact::matrix::*;
use symfact::symbolic::*;

fn main() {
    // 2 x 2 blocks, block pattern
    // [x x .]
    // [x x x]
    // [. x x]
    let bsr = BsrMatrix::<f64>::new(2, 3, 3, vec![0, 2, 5, 7], vec![0, 1, 0, 1, 2, 1, 2]).unwrap();
    let mut M = Matrix::new(bsr);

    for i in 0..6 {
        M.set_values(&[i], &[i], &[4.], InsertMode::Insert).unwrap();
    }
    M.assemble().unwrap();

    let settings = SymbolicSettingsBuilder::default()
        .lu_packing(LuPacking::Packed)
        .build()
        .unwrap();
    let mut factorizer = SymbolicFactorizer::new(settings).unwrap();
    let P = Permutation::new(vec![2, 1, 0]).unwrap();
    let mut F = M.factor_symbolic(&mut factorizer, &P, &P).unwrap();

    println!("block size       = {}", F.block_size());
    println!("factor blocks    = {}", F.pattern().nnz());
    println!("factor values    = {}", F.nzval().len());

    // a numeric pass would fill the values here
    F.set_unfactored();
    F.set_value(0, 0, 4., InsertMode::Insert).unwrap();
    F.assemble().unwrap();
    F.mark_factored().unwrap();
    println!("state            = {:?}", F.state());
}
