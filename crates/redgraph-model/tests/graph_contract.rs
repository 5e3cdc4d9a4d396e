// SPDX-License-Identifier: Apache-2.0

use ndarray::{arr1, arr2};
use redgraph_model::{DType, Graph, GraphError, NodeData};

fn triangle() -> Graph {
    Graph::from_coo(3, vec![0, 1, 2, 2], vec![1, 2, 0, 0]).expect("graph")
}

#[test]
fn counts_follow_the_coordinate_list_verbatim() {
    let g = Graph::from_coo(3, vec![0, 0, 1, 1], vec![0, 0, 1, 2]).expect("graph");
    assert_eq!(g.num_nodes(), 3);
    assert_eq!(g.num_edges(), 4, "duplicates and self-loops are kept");
    let (src, dst) = g.edges();
    assert_eq!(src, &[0, 0, 1, 1]);
    assert_eq!(dst, &[0, 0, 1, 2]);
}

#[test]
fn isolated_nodes_count_toward_num_nodes() {
    let g = Graph::from_coo(10, vec![0], vec![1]).expect("graph");
    assert_eq!(g.num_nodes(), 10);
    assert_eq!(g.num_edges(), 1);
}

#[test]
fn out_of_range_endpoint_is_rejected() {
    let err = Graph::from_coo(2, vec![0, 1], vec![1, 2]).expect_err("out of range");
    assert_eq!(
        err,
        GraphError::NodeOutOfRange {
            node: 2,
            num_nodes: 2
        }
    );
}

#[test]
fn mismatched_endpoint_lists_are_rejected() {
    let err = Graph::from_coo(2, vec![0, 1], vec![1]).expect_err("mismatch");
    assert!(matches!(err, GraphError::EndpointCountMismatch { rows: 2, cols: 1 }));
}

#[test]
fn node_data_must_match_node_count() {
    let g = triangle();
    let err = g
        .set_ndata("label", NodeData::Int64(arr1(&[0_i64, 1]).into_shared()))
        .expect_err("short array");
    assert!(err.to_string().contains("`label` has 2 rows"));
    assert!(g.ndata("label").is_none());
}

#[test]
fn node_data_is_replaced_in_place() {
    let g = triangle();
    g.set_ndata("feat", NodeData::Float32(arr2(&[[0.0_f32], [1.0], [2.0]]).into_shared()))
        .expect("first");
    g.set_ndata(
        "feat",
        NodeData::Float32(arr2(&[[5.0_f32, 6.0], [7.0, 8.0], [9.0, 10.0]]).into_shared()),
    )
    .expect("second");

    let feat = g.ndata("feat").expect("feat");
    assert_eq!(feat.dtype(), DType::Float32);
    assert_eq!(feat.shape(), vec![3, 2]);
    assert_eq!(g.ndata_keys(), vec!["feat".to_string()]);
}

#[test]
fn cloned_node_data_shares_storage() {
    let g = triangle();
    let mask = arr1(&[true, false, true]).into_shared();
    g.set_ndata("train_mask", NodeData::Bool(mask.clone()))
        .expect("mask");
    let read_back = g.ndata("train_mask").expect("mask");
    assert_eq!(read_back.as_bool().expect("bool").as_ptr(), mask.as_ptr());
}
