pub fn help() {
    println!(
        "Commands:

show | s - print the tree with heights and balance factors
left | l <value> - rotate the node holding <value> to the left
right | r <value> - rotate the node holding <value> to the right
add | a - add a random node (only once the tree is balanced)
new | n - start over with a new random tree
dump | d - print the tree as json
help | h - print this message
quit | q - quit the program

Nodes marked with ! have a balance factor outside [-1, 1].
"
    );
}
